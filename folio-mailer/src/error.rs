use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("Email transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Email address error: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Email builder error: {0}")]
    Builder(String),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("File transport error: {0}")]
    File(#[from] lettre::transport::file::Error),

    #[error("Email message error: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("Connection verification failed: {0}")]
    Verification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MailerError>;

/// Failures of a single contact relay attempt.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Missing required fields: {}", .0.join(", "))]
    Validation(Vec<&'static str>),

    #[error("Email service not initialized: {0}")]
    NotInitialized(String),

    #[error("Email delivery failed: {0}")]
    Delivery(#[from] MailerError),
}

impl RelayError {
    /// True when the caller sent a bad submission rather than the server failing.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RelayError::Validation(_))
    }
}
