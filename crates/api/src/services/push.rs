//! Push relay notification service.
//!
//! Implements the PushNotifier trait by posting fan-out requests to an
//! external push relay. The relay owns web-push subscriptions and VAPID
//! signing; this service only addresses users by ID.

use std::time::Duration;

use async_trait::async_trait;
use domain::services::{PushMessage, PushNotifier, PushResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::PushConfig;

/// Push notifier backed by the relay's HTTP API.
pub struct RelayPushNotifier {
    client: Client,
    config: PushConfig,
}

/// Fan-out request sent to the relay.
#[derive(Debug, Serialize)]
struct RelayNotifyRequest<'a> {
    user_ids: &'a [Uuid],
    title: &'a str,
    body: &'a str,
}

/// Relay delivery report.
#[derive(Debug, Deserialize)]
struct RelayNotifyResponse {
    sent: usize,
    failed: usize,
}

impl RelayPushNotifier {
    /// Creates a new relay notifier from configuration.
    pub fn new(config: PushConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .unwrap_or_default();

        Self { client, config }
    }

    fn notify_url(&self) -> String {
        format!("{}/v1/notify", self.config.relay_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PushNotifier for RelayPushNotifier {
    async fn send_to_users(&self, user_ids: &[Uuid], message: PushMessage) -> PushResult {
        if user_ids.is_empty() {
            return PushResult::Skipped;
        }

        let request = RelayNotifyRequest {
            user_ids,
            title: &message.title,
            body: &message.body,
        };

        let response = self
            .client
            .post(self.notify_url())
            .header("x-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status().is_success() => {
                match resp.json::<RelayNotifyResponse>().await {
                    Ok(report) => {
                        tracing::debug!(
                            sent = report.sent,
                            failed = report.failed,
                            "Push relay accepted notification"
                        );
                        PushResult::Sent {
                            sent: report.sent,
                            failed: report.failed,
                        }
                    }
                    Err(e) => {
                        // Delivered as far as we can tell; report is lost
                        tracing::warn!("Push relay returned unparseable report: {}", e);
                        PushResult::Sent {
                            sent: user_ids.len(),
                            failed: 0,
                        }
                    }
                }
            }
            Ok(resp) => {
                let status = resp.status();
                tracing::warn!(status = %status, "Push relay rejected notification");
                PushResult::Failed(format!("relay returned {}", status))
            }
            Err(e) => {
                tracing::warn!("Push relay request failed: {}", e);
                PushResult::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(relay_url: &str) -> PushConfig {
        PushConfig {
            enabled: true,
            relay_url: relay_url.to_string(),
            api_key: "test-key".to_string(),
            timeout_ms: 100,
        }
    }

    #[test]
    fn test_notify_url_strips_trailing_slash() {
        let notifier = RelayPushNotifier::new(test_config("https://push.example.com/"));
        assert_eq!(notifier.notify_url(), "https://push.example.com/v1/notify");
    }

    #[test]
    fn test_notify_url_without_trailing_slash() {
        let notifier = RelayPushNotifier::new(test_config("https://push.example.com"));
        assert_eq!(notifier.notify_url(), "https://push.example.com/v1/notify");
    }

    #[tokio::test]
    async fn test_empty_recipients_skipped() {
        let notifier = RelayPushNotifier::new(test_config("http://127.0.0.1:1"));
        let result = notifier
            .send_to_users(&[], PushMessage::new("t", "b"))
            .await;
        assert!(matches!(result, PushResult::Skipped));
    }

    #[tokio::test]
    async fn test_unreachable_relay_reports_failure() {
        // Nothing listens on port 1; the request errors out fast
        let notifier = RelayPushNotifier::new(test_config("http://127.0.0.1:1"));
        let result = notifier
            .send_to_users(&[Uuid::new_v4()], PushMessage::new("t", "b"))
            .await;
        assert!(matches!(result, PushResult::Failed(_)));
    }
}
