// src/services/notification_service.rs

use std::sync::Arc;

use tracing::info;

use quartermaster_common::error::Error;
use quartermaster_common::models::NotificationType;
use quartermaster_common::traits::collaborator_traits::MailTransport;

pub struct NotificationService {
    mail: Arc<dyn MailTransport>,
}

impl NotificationService {
    pub fn new(mail: Arc<dyn MailTransport>) -> Self {
        Self { mail }
    }

    pub async fn send_notification_email(
        &self,
        recipients: &[String],
        subject: &str,
        body: &str,
        kind: NotificationType,
    ) -> Result<(), Error> {
        if recipients.is_empty() || recipients.iter().any(|r| r.trim().is_empty()) {
            return Err(Error::ValidationError(
                "at least one non-empty recipient is required".to_string(),
            ));
        }
        if subject.trim().is_empty() {
            return Err(Error::ValidationError(
                "subject must not be empty".to_string(),
            ));
        }
        if body.trim().is_empty() {
            return Err(Error::ValidationError(
                "body must not be empty".to_string(),
            ));
        }

        self.mail.send(recipients, subject, body, kind).await?;
        info!(
            "sent {} notification to {} recipient(s)",
            kind,
            recipients.len()
        );
        Ok(())
    }
}
