use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    message::{header, Mailbox, SinglePart},
    transport::smtp::authentication::Credentials,
    Message, SmtpTransport, Transport,
};
use tracing::{error, info, warn};

use crate::{config::SmtpConfig, Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html_body: String,
}

/// Delivery collaborator. Reports only success or failure.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: OutgoingEmail) -> Result<()>;
}

#[derive(Clone)]
pub struct SmtpMailer {
    from: Mailbox,
    transport: SmtpTransport,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = SmtpTransport::starttls_relay(&config.server)?
            .credentials(creds)
            .port(config.port)
            .build();

        Ok(Self {
            from: config.username.parse()?,
            transport,
        })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<()> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(email.subject);

        if let Some(reply_to) = email.reply_to {
            builder = builder.reply_to(reply_to.parse()?);
        }

        let message = builder.singlepart(
            SinglePart::builder()
                .header(header::ContentType::TEXT_HTML)
                .body(email.html_body),
        )?;

        let transport = self.transport.clone();
        let result = tokio::task::spawn_blocking(move || transport.send(&message))
            .await
            .map_err(|e| {
                error!("Mail task failed: {:?}", e);
                Error::InternalServerError
            })?;

        match result {
            Ok(_) => {
                info!(to = %email.to, "Email sent successfully");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// SMTP when configured, otherwise the logging stand-in. SMTP settings that
/// are present but unusable are an error, never a silent fallback.
pub fn build_mailer(smtp: Option<&SmtpConfig>) -> Result<Arc<dyn MailTransport>> {
    match smtp {
        Some(config) => Ok(Arc::new(SmtpMailer::new(config)?)),
        None => {
            warn!("SMTP not configured, contact messages will only be logged");
            Ok(Arc::new(LogMailer))
        }
    }
}

/// Stands in for SMTP when it is not configured: the message is logged and
/// reported as delivered.
#[derive(Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl MailTransport for LogMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<()> {
        info!(
            to = %email.to,
            reply_to = ?email.reply_to,
            subject = %email.subject,
            "SMTP not configured, email logged instead of sent"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smtp(username: &str) -> SmtpConfig {
        SmtpConfig {
            server: "smtp.example.com".to_string(),
            port: 587,
            username: username.to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn unconfigured_smtp_falls_back_to_logging() {
        assert!(build_mailer(None).is_ok());
    }

    #[test]
    fn configured_smtp_builds_a_transport() {
        assert!(build_mailer(Some(&smtp("noreply@example.com"))).is_ok());
    }

    #[test]
    fn unusable_smtp_settings_are_an_error() {
        let result = build_mailer(Some(&smtp("apikey")));
        assert!(matches!(result, Err(Error::MailError(_))));
    }
}
