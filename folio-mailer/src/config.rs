use crate::transports::TlsConfig;
use crate::{FileTransport, Mailer, MailerError, SmtpTransport};
use lettre::Address;
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
pub const DEFAULT_SMTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailerConfig {
    pub transport: TransportConfig,
    pub from_address: String,
    pub from_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransportConfig {
    Smtp {
        host: String,
        port: Option<u16>,
        username: Option<String>,
        password: Option<Secret>,
        tls: Option<TlsType>,
        timeout_secs: Option<u64>,
    },
    File {
        output_dir: PathBuf,
    },
}

/// Provider secret. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TlsType {
    None,
    StartTls,
    Tls,
}

impl From<TlsType> for TlsConfig {
    fn from(tls_type: TlsType) -> Self {
        match tls_type {
            TlsType::None => TlsConfig::None,
            TlsType::StartTls => TlsConfig::StartTls,
            TlsType::Tls => TlsConfig::Tls,
        }
    }
}

impl std::str::FromStr for TlsType {
    type Err = MailerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(TlsType::None),
            "starttls" => Ok(TlsType::StartTls),
            "tls" => Ok(TlsType::Tls),
            other => Err(MailerError::Config(format!(
                "MAILER_SMTP_TLS must be one of none, starttls, tls (got {other:?})"
            ))),
        }
    }
}

/// Checks the SMTP account and secret before they reach the transport.
///
/// The secret must be given exactly as the provider issues it. Gmail shows app
/// passwords as four space-separated groups of four letters; the spaces are not
/// part of the password and must be removed before it is configured.
pub fn validate_credentials(username: &str, password: &str) -> Result<(), MailerError> {
    if username.trim().is_empty() {
        return Err(MailerError::Config(
            "MAILER_SMTP_USERNAME must not be empty".to_string(),
        ));
    }

    if password.is_empty() {
        return Err(MailerError::Config(
            "MAILER_SMTP_PASSWORD must not be empty".to_string(),
        ));
    }

    if password.chars().any(char::is_whitespace) {
        return Err(MailerError::Config(
            "MAILER_SMTP_PASSWORD must not contain whitespace; \
             enter app passwords without the spaces between groups"
                .to_string(),
        ));
    }

    Ok(())
}

impl MailerConfig {
    pub fn from_env() -> Result<Self, MailerError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MailerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let username = var("MAILER_SMTP_USERNAME");
        let password = var("MAILER_SMTP_PASSWORD");

        let smtp_host = var("MAILER_SMTP_HOST").or_else(|| {
            (username.is_some() || password.is_some()).then(|| DEFAULT_SMTP_HOST.to_string())
        });

        let transport = if let Some(host) = smtp_host {
            match (&username, &password) {
                (Some(username), Some(password)) => validate_credentials(username, password)?,
                (None, None) => {}
                _ => {
                    return Err(MailerError::Config(
                        "MAILER_SMTP_USERNAME and MAILER_SMTP_PASSWORD must be set together"
                            .to_string(),
                    ));
                }
            }

            TransportConfig::Smtp {
                host,
                port: var("MAILER_SMTP_PORT")
                    .map(|p| {
                        p.parse().map_err(|_| {
                            MailerError::Config(format!("MAILER_SMTP_PORT is not a port: {p}"))
                        })
                    })
                    .transpose()?,
                username: username.clone(),
                password: password.map(Secret::new),
                tls: var("MAILER_SMTP_TLS").map(|t| t.parse()).transpose()?,
                timeout_secs: var("MAILER_SMTP_TIMEOUT_SECS")
                    .map(|t| {
                        t.parse().map_err(|_| {
                            MailerError::Config(format!(
                                "MAILER_SMTP_TIMEOUT_SECS is not a number of seconds: {t}"
                            ))
                        })
                    })
                    .transpose()?,
            }
        } else if let Some(output_dir) = var("MAILER_FILE_OUTPUT_DIR") {
            TransportConfig::File {
                output_dir: PathBuf::from(output_dir),
            }
        } else {
            // Default to file transport for development
            TransportConfig::File {
                output_dir: PathBuf::from("./emails"),
            }
        };

        Ok(Self {
            transport,
            from_address: var("MAILER_FROM_ADDRESS")
                .or(username)
                .unwrap_or_else(|| "noreply@example.com".to_string()),
            from_name: var("MAILER_FROM_NAME"),
        })
    }

    pub fn build_transport(&self) -> Result<Arc<dyn Mailer>, MailerError> {
        match &self.transport {
            TransportConfig::Smtp {
                host,
                port,
                username,
                password,
                tls,
                timeout_secs,
            } => {
                let mut builder = SmtpTransport::builder(host);

                if let Some(port) = port {
                    builder = builder.port(*port);
                }

                if let (Some(username), Some(password)) = (username, password) {
                    validate_credentials(username, password.expose())?;
                    builder = builder.credentials(username, password.expose());
                }

                if let Some(tls) = tls {
                    builder = builder.tls(tls.clone().into());
                }

                let timeout = timeout_secs
                    .map(Duration::from_secs)
                    .unwrap_or(DEFAULT_SMTP_TIMEOUT);
                builder = builder.timeout(timeout);

                Ok(Arc::new(builder.build()?))
            }
            TransportConfig::File { output_dir } => Ok(Arc::new(FileTransport::new(output_dir)?)),
        }
    }

    /// Builds the transport and verifies it with a round trip to the provider.
    pub async fn connect(&self) -> Result<Arc<dyn Mailer>, MailerError> {
        self.check_from_address()?;
        let transport = self.build_transport()?;
        transport.verify().await?;
        Ok(transport)
    }

    /// The envelope origin as a mailbox, display name included.
    pub fn from_mailbox(&self) -> Result<Mailbox, MailerError> {
        let address: Address = self.from_address.parse().map_err(|e| {
            MailerError::Config(format!(
                "MAILER_FROM_ADDRESS is not a valid address ({:?}): {e}",
                self.from_address
            ))
        })?;
        Ok(Mailbox::new(self.from_name.clone(), address))
    }

    /// Fails unless the formatted origin parses back into a mailbox.
    pub fn check_from_address(&self) -> Result<(), MailerError> {
        let formatted = self.from_mailbox()?.to_string();
        formatted.parse::<Mailbox>().map_err(|e| {
            MailerError::Config(format!(
                "MAILER_FROM_NAME and MAILER_FROM_ADDRESS do not form a valid sender ({formatted:?}): {e}"
            ))
        })?;
        Ok(())
    }

    /// Display names are quoted when they contain special characters.
    pub fn get_from_address(&self) -> String {
        match self.from_mailbox() {
            Ok(mailbox) => mailbox.to_string(),
            Err(_) => self.from_address.clone(),
        }
    }

    /// Short description of the transport, safe to log.
    pub fn describe_transport(&self) -> String {
        match &self.transport {
            TransportConfig::Smtp { host, port, .. } => match port {
                Some(port) => format!("smtp://{host}:{port}"),
                None => format!("smtp://{host}"),
            },
            TransportConfig::File { output_dir } => format!("file://{}", output_dir.display()),
        }
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::File {
                output_dir: PathBuf::from("./emails"),
            },
            from_address: "noreply@example.com".to_string(),
            from_name: None,
        }
    }
}
