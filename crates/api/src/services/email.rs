//! Email service for sending invitation links.
//!
//! Supports multiple email providers:
//! - `console`: Logs emails to console (development)
//! - `sendgrid`: Uses SendGrid API

use crate::config::EmailConfig;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info};

/// Errors that can occur during email operations.
#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Email service not configured")]
    NotConfigured,

    #[error("Failed to send email: {0}")]
    SendFailed(String),

    #[error("Provider error: {0}")]
    ProviderError(String),
}

/// Email message to be sent.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    /// Recipient email address
    pub to: String,
    /// Email subject
    pub subject: String,
    /// Plain text body
    pub body_text: String,
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: Arc<EmailConfig>,
}

impl EmailService {
    /// Creates a new EmailService with the given configuration.
    pub fn new(config: EmailConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Check if email service is enabled.
    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Send an email message.
    pub async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        if !self.config.enabled {
            debug!(
                to = %message.to,
                subject = %message.subject,
                "Email service disabled, skipping send"
            );
            return Ok(());
        }

        match self.config.provider.as_str() {
            "console" => self.send_console(message).await,
            "sendgrid" => self.send_sendgrid(message).await,
            provider => {
                error!(provider = %provider, "Unknown email provider");
                Err(EmailError::NotConfigured)
            }
        }
    }

    /// Send a group invitation email with the redeem link.
    pub async fn send_invite_email(
        &self,
        to_email: &str,
        inviter_name: Option<&str>,
        group_name: &str,
        invite_url: &str,
    ) -> Result<(), EmailError> {
        let subject = format!("You're invited to join {} on Giftlink", group_name);

        let body_text = format!(
            r#"Hi,

{inviter} invited you to join the group "{group}" on Giftlink.

Open the link below to join:

{url}

The invitation can be used once and expires automatically.

If you weren't expecting this, you can safely ignore this email.

The Giftlink Team"#,
            inviter = inviter_name.unwrap_or("Someone"),
            group = group_name,
            url = invite_url
        );

        let message = EmailMessage {
            to: to_email.to_string(),
            subject,
            body_text,
        };

        self.send(message).await
    }

    /// Console provider - logs the email instead of sending it.
    async fn send_console(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            from = %self.config.sender_email,
            from_name = %self.config.sender_name,
            "Email (console provider)"
        );

        info!(
            body_text = %message.body_text,
            "Email body (plain text)"
        );

        Ok(())
    }

    /// SendGrid provider - sends via SendGrid API.
    async fn send_sendgrid(&self, message: EmailMessage) -> Result<(), EmailError> {
        if self.config.sendgrid_api_key.is_empty() {
            return Err(EmailError::NotConfigured);
        }

        let client = reqwest::Client::new();

        let body = serde_json::json!({
            "personalizations": [{
                "to": [{ "email": message.to }]
            }],
            "from": {
                "email": self.config.sender_email,
                "name": self.config.sender_name
            },
            "subject": message.subject,
            "content": [{
                "type": "text/plain",
                "value": message.body_text
            }]
        });

        let response = client
            .post("https://api.sendgrid.com/v3/mail/send")
            .bearer_auth(&self.config.sendgrid_api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::SendFailed(e.to_string()))?;

        if response.status().is_success() {
            info!(to = %message.to, "Email sent via SendGrid");
            Ok(())
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(EmailError::ProviderError(format!(
                "SendGrid returned {}: {}",
                status, text
            )))
        }
    }
}
