//! Push notification abstraction.
//!
//! Notifications are best-effort: they run after the primary transaction
//! commits and their failure is logged, never surfaced to the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A push message addressed to one or more users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PushMessage {
    pub title: String,
    pub body: String,
}

impl PushMessage {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Result of a push delivery attempt.
#[derive(Debug, Clone)]
pub enum PushResult {
    /// Delivered (or handed to the relay) for `sent` recipients.
    Sent { sent: usize, failed: usize },
    /// Nothing to do (no recipients).
    Skipped,
    /// Delivery failed entirely (non-blocking for the caller).
    Failed(String),
}

/// Push notification sender.
#[async_trait::async_trait]
pub trait PushNotifier: Send + Sync {
    /// Send a message to the given users. Must never panic; failures are
    /// reported through the result and are the caller's to log and drop.
    async fn send_to_users(&self, user_ids: &[Uuid], message: PushMessage) -> PushResult;
}

/// Mock push notifier for development and testing.
///
/// Logs messages but doesn't actually send them.
#[derive(Debug, Clone, Default)]
pub struct MockPushNotifier {
    /// Whether to simulate failures for testing.
    pub simulate_failure: bool,
}

impl MockPushNotifier {
    pub fn new() -> Self {
        Self {
            simulate_failure: false,
        }
    }

    /// Create a mock notifier that simulates failures.
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
        }
    }
}

#[async_trait::async_trait]
impl PushNotifier for MockPushNotifier {
    async fn send_to_users(&self, user_ids: &[Uuid], message: PushMessage) -> PushResult {
        if user_ids.is_empty() {
            return PushResult::Skipped;
        }

        if self.simulate_failure {
            tracing::warn!(
                recipients = user_ids.len(),
                title = %message.title,
                "Mock push notifier simulating failure"
            );
            return PushResult::Failed("Simulated failure".to_string());
        }

        tracing::info!(
            recipients = user_ids.len(),
            title = %message.title,
            body = %message.body,
            "Mock: Would send push notification"
        );

        PushResult::Sent {
            sent: user_ids.len(),
            failed: 0,
        }
    }
}
