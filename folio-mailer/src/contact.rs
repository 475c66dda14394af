use crate::{Email, MailerError, templates::ContactTemplate};
use askama::Template;
use serde::{Deserialize, Serialize};

/// A message left through the public contact form.
///
/// Every field is required. An empty string is treated as missing; no other
/// validation (address syntax, length) is applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub sender_name: String,
    pub sender_email: String,
    pub message: String,
    pub recipient_email: String,
}

impl ContactSubmission {
    pub fn new(
        sender_name: impl Into<String>,
        sender_email: impl Into<String>,
        message: impl Into<String>,
        recipient_email: impl Into<String>,
    ) -> Self {
        Self {
            sender_name: sender_name.into(),
            sender_email: sender_email.into(),
            message: message.into(),
            recipient_email: recipient_email.into(),
        }
    }

    /// Names of the required fields that are empty, in declaration order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("sender_name", &self.sender_name),
            ("sender_email", &self.sender_email),
            ("message", &self.message),
            ("recipient_email", &self.recipient_email),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn subject(&self) -> String {
        format!("New message from {}", self.sender_name)
    }

    pub fn text_body(&self) -> String {
        format!(
            "From: {} ({})\n\nMessage:\n{}",
            self.sender_name, self.sender_email, self.message
        )
    }

    pub fn html_body(&self) -> Result<String, MailerError> {
        Ok(ContactTemplate::new(&self.sender_name, &self.sender_email, &self.message).render()?)
    }
}

pub struct ContactEmail;

impl ContactEmail {
    /// Renders `submission` into an email sent from `from` to the submission's
    /// recipient, with replies directed at the visitor.
    pub fn build(from: &str, submission: &ContactSubmission) -> Result<Email, MailerError> {
        Email::builder()
            .from(from)
            .to(&submission.recipient_email)
            .reply_to(&submission.sender_email)
            .subject(submission.subject())
            .html_body(submission.html_body()?)
            .text_body(submission.text_body())
            .build()
    }
}
