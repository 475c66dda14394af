//! # Folio Mailer
//!
//! Email delivery for the Folio portfolio server. It provides the message model,
//! SMTP and file transports built on `lettre`, and [`ContactRelay`], which turns
//! contact-form submissions into notification emails.
//!
//! ```rust,no_run
//! use folio_mailer::{ContactRelay, ContactSubmission, MailerConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MailerConfig::from_env()?;
//! let relay = ContactRelay::initialize(&config).await;
//!
//! let submission = ContactSubmission::new("Ann", "ann@x.com", "Hi\nthere", "me@y.com");
//! let sent = relay.send_contact_email(&submission).await?;
//! println!("sent {}", sent.message_id);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod contact;
pub mod email;
pub mod error;
pub mod mailer;
pub mod relay;
pub mod templates;
pub mod transports;

pub use config::{MailerConfig, Secret, TransportConfig};
pub use contact::{ContactEmail, ContactSubmission};
pub use email::{Email, EmailBuilder};
pub use error::{MailerError, RelayError};
pub use mailer::Mailer;
pub use relay::{ContactRelay, SentMessage, TransportState};
pub use templates::ContactTemplate;
pub use transports::{FileTransport, SmtpTransport};

pub mod prelude {
    pub use crate::{
        ContactEmail, ContactRelay, ContactSubmission, Email, EmailBuilder, FileTransport, Mailer,
        MailerConfig, MailerError, RelayError, SentMessage, SmtpTransport, TransportState,
    };
}
