use std::{path::Path, sync::Arc};

use shared::protocol::{EmailAttachment, EmailMessage};
use tracing::{info, warn};

use crate::{
    api::EmailApi,
    error::{ClientError, ClientResult},
};

/// Compose-and-send state for the e-mail form.
pub struct EmailComposer {
    api: Arc<dyn EmailApi>,
    pub to: String,
    pub cc: String,
    pub subject: String,
    pub body: String,
    attachment: Option<EmailAttachment>,
}

impl EmailComposer {
    pub fn new(api: Arc<dyn EmailApi>) -> Self {
        Self {
            api,
            to: String::new(),
            cc: String::new(),
            subject: String::new(),
            body: String::new(),
            attachment: None,
        }
    }

    pub fn attach(&mut self, attachment: EmailAttachment) {
        self.attachment = Some(attachment);
    }

    /// Reads the file and attaches it, guessing the MIME type from its extension.
    pub async fn attach_file(&mut self, path: &Path) -> ClientResult<()> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ClientError::Io {
                context: format!("read {}", path.display()),
                source,
            })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        self.attach(EmailAttachment {
            mime_type: mime_guess::from_path(path).first_raw().map(str::to_string),
            file_name,
            bytes,
        });
        Ok(())
    }

    pub fn attachment(&self) -> Option<&EmailAttachment> {
        self.attachment.as_ref()
    }

    fn message(&self) -> EmailMessage {
        EmailMessage {
            to: self.to.trim().to_string(),
            cc: Some(self.cc.trim().to_string()).filter(|cc| !cc.is_empty()),
            subject: self.subject.clone(),
            body: self.body.clone(),
        }
    }

    fn clear(&mut self) {
        self.to.clear();
        self.cc.clear();
        self.subject.clear();
        self.body.clear();
        self.attachment = None;
    }

    /// Fields are cleared only after the server accepted the message.
    pub async fn send(&mut self) -> ClientResult<serde_json::Value> {
        if self.to.trim().is_empty() {
            return Err(ClientError::MissingRecipient);
        }

        let message = self.message();
        let response = self
            .api
            .send_email(&message, self.attachment.clone())
            .await
            .inspect_err(|err| warn!(to = %message.to, "failed to send email: {err}"))?;

        info!(
            to = %message.to,
            attachment = self.attachment.is_some(),
            "email sent"
        );
        self.clear();
        Ok(response)
    }

    pub async fn send_plain(&mut self) -> ClientResult<String> {
        if self.to.trim().is_empty() {
            return Err(ClientError::MissingRecipient);
        }

        let message = self.message();
        let response = self
            .api
            .send_plain_email(&message)
            .await
            .inspect_err(|err| warn!(to = %message.to, "failed to send email: {err}"))?;
        self.clear();
        Ok(response)
    }
}

#[cfg(test)]
#[path = "tests/email_tests.rs"]
mod tests;
