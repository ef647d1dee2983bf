use std::sync::Arc;

use tracing::{info, instrument};
use validator::Validate;

use crate::{
    mail::{mails::send_contact_email, sendmail::MailTransport},
    models::contact::ContactMessageDto,
    Result,
};

#[derive(Clone)]
pub struct ContactService {
    mailer: Arc<dyn MailTransport>,
    recipient: String,
}

impl ContactService {
    pub fn new(mailer: Arc<dyn MailTransport>, recipient: String) -> Self {
        Self { mailer, recipient }
    }

    /// Validates the message and hands it to the mail transport. Nothing is
    /// stored and a failed delivery is not retried.
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    pub async fn submit(&self, message: ContactMessageDto) -> Result<()> {
        message.validate()?;

        send_contact_email(self.mailer.as_ref(), &self.recipient, &message).await?;

        info!("Contact message forwarded");
        Ok(())
    }
}
