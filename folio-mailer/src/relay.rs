//! The contact relay: validates a form submission, renders it and hands it to
//! the shared transport.

use crate::{ContactEmail, ContactSubmission, Mailer, MailerConfig, RelayError};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Whether the transport passed verification at startup.
#[derive(Clone)]
pub enum TransportState {
    Ready(Arc<dyn Mailer>),
    Unavailable(String),
}

impl fmt::Debug for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportState::Ready(_) => f.write_str("Ready"),
            TransportState::Unavailable(reason) => {
                f.debug_tuple("Unavailable").field(reason).finish()
            }
        }
    }
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentMessage {
    pub message_id: String,
}

/// Relays contact-form submissions through a transport fixed at construction.
#[derive(Debug, Clone)]
pub struct ContactRelay {
    state: TransportState,
    from_address: String,
}

impl ContactRelay {
    pub fn new(transport: Arc<dyn Mailer>, from_address: impl Into<String>) -> Self {
        Self {
            state: TransportState::Ready(transport),
            from_address: from_address.into(),
        }
    }

    /// A relay whose transport never became ready. Every send fails fast.
    pub fn uninitialized(reason: impl Into<String>, from_address: impl Into<String>) -> Self {
        Self {
            state: TransportState::Unavailable(reason.into()),
            from_address: from_address.into(),
        }
    }

    /// Builds and verifies the transport described by `config`.
    ///
    /// A failed verification is logged and yields an uninitialized relay
    /// instead of an error, so the server can still start.
    pub async fn initialize(config: &MailerConfig) -> Self {
        let from_address = config.get_from_address();
        let transport = config.describe_transport();

        match config.connect().await {
            Ok(mailer) => {
                info!(%transport, "Email service initialized");
                Self::new(mailer, from_address)
            }
            Err(e) => {
                error!(%transport, error = %e, "Email service initialization failed");
                Self::uninitialized(e.to_string(), from_address)
            }
        }
    }

    /// Loads [`MailerConfig`] from the environment and initializes from it.
    pub async fn from_env() -> Self {
        match MailerConfig::from_env() {
            Ok(config) => Self::initialize(&config).await,
            Err(e) => {
                error!(error = %e, "Invalid mailer configuration");
                Self::uninitialized(e.to_string(), MailerConfig::default().get_from_address())
            }
        }
    }

    pub fn state(&self) -> &TransportState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, TransportState::Ready(_))
    }

    pub fn from_address(&self) -> &str {
        &self.from_address
    }

    /// Sends one notification for `submission`. Exactly one delivery attempt is made.
    #[instrument(skip_all, fields(recipient = %submission.recipient_email))]
    pub async fn send_contact_email(
        &self,
        submission: &ContactSubmission,
    ) -> Result<SentMessage, RelayError> {
        let missing = submission.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "Rejected contact submission");
            return Err(RelayError::Validation(missing));
        }

        let transport = match &self.state {
            TransportState::Ready(transport) => transport,
            TransportState::Unavailable(reason) => {
                return Err(RelayError::NotInitialized(reason.clone()));
            }
        };

        let email = ContactEmail::build(&self.from_address, submission)?;
        let message_id = transport.send_email(email).await.map_err(|e| {
            error!(error = %e, "Error sending email");
            RelayError::Delivery(e)
        })?;

        info!(%message_id, "Email sent successfully");
        Ok(SentMessage { message_id })
    }
}
