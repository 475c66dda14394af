use crate::{Email, MailerError};
use async_trait::async_trait;

/// A message transport. Implementations are shared across request handlers.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Submits `email` and returns the `Message-ID` it was sent with.
    async fn send_email(&self, email: Email) -> Result<String, MailerError>;

    /// Round trip that proves the transport can accept messages.
    async fn verify(&self) -> Result<(), MailerError>;
}
