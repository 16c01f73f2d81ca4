use async_trait::async_trait;
use lettre::message::header;
use lettre::message::Mailbox;
use lettre::message::Message;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Tokio1Executor;

use crate::config::EmailConfig;
use crate::domain::reset::errors::MailerError;
use crate::domain::reset::models::ResetTokenId;
use crate::domain::reset::ports::ResetMailer;

/// SMTP implementation of the reset-link mailer.
///
/// With an empty SMTP host the mailer runs in no-op mode and only logs the
/// would-be delivery. Useful for development and testing without mail
/// infrastructure.
pub struct SmtpResetMailer {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from: Mailbox,
    reset_base_url: String,
}

impl SmtpResetMailer {
    /// Build the mailer from configuration.
    ///
    /// # Errors
    /// * `InvalidRecipient` - The configured sender address does not parse
    /// * `SendFailed` - The SMTP transport could not be configured
    pub fn new(config: &EmailConfig) -> Result<Self, MailerError> {
        let from = config
            .sender
            .parse::<Mailbox>()
            .map_err(|e| MailerError::InvalidRecipient(format!("sender address: {}", e)))?;

        let transport = if config.smtp_host.trim().is_empty() {
            tracing::warn!("SMTP host not configured; reset mail will operate in no-op mode");
            None
        } else {
            let mut builder =
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
                    .map_err(|e| MailerError::SendFailed(e.to_string()))?
                    .port(config.smtp_port);

            if let (Some(username), Some(password)) =
                (&config.smtp_username, &config.smtp_password)
            {
                builder =
                    builder.credentials(Credentials::new(username.clone(), password.clone()));
            }

            Some(builder.build())
        };

        Ok(Self {
            transport,
            from,
            reset_base_url: config.reset_base_url.clone(),
        })
    }

    fn reset_link(&self, token_id: &ResetTokenId) -> String {
        format!("{}/{}", self.reset_base_url.trim_end_matches('/'), token_id)
    }
}

#[async_trait]
impl ResetMailer for SmtpResetMailer {
    async fn send_reset_link(
        &self,
        recipient: &str,
        token_id: &ResetTokenId,
    ) -> Result<(), MailerError> {
        let link = self.reset_link(token_id);

        let Some(transport) = &self.transport else {
            tracing::info!(recipient, link = %link, "No-op mailer: skipping reset mail delivery");
            return Ok(());
        };

        let to = recipient
            .parse::<Mailbox>()
            .map_err(|e| MailerError::InvalidRecipient(e.to_string()))?;

        let body = format!(
            "A password reset was requested for your account.\n\n\
             Open the following link to choose a new password:\n{}\n\n\
             The link is valid for a limited time and can be used once.\n\
             If you did not request this, you can ignore this email.",
            link
        );

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject("Reset your password")
            .header(header::ContentType::TEXT_PLAIN)
            .body(body)
            .map_err(|e| MailerError::SendFailed(e.to_string()))?;

        transport
            .send(message)
            .await
            .map_err(|e| MailerError::SendFailed(e.to_string()))?;

        tracing::info!(recipient, "Reset mail sent");
        Ok(())
    }
}
