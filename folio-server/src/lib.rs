//! # Folio Server
//!
//! The HTTP side of the Folio portfolio. It serves the built single-page app
//! and exposes two API endpoints:
//!
//! - `POST /api/send-email` relays a contact-form submission by email
//! - `GET /api/health` reports liveness
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use folio_mailer::{ContactRelay, MailerConfig};
//! use folio_server::Environment;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let relay = ContactRelay::initialize(&MailerConfig::from_env()?).await;
//!
//!     let app = folio_server::routes(Arc::new(relay))
//!         .environment(Environment::Development)
//!         .static_dir("dist")
//!         .build();
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
mod routes;
mod types;

pub use config::{ConfigError, Environment, ServerConfig};
pub use error::{ApiError, Result};
pub use routes::{AppState, create_router};
pub use types::{ErrorResponse, HealthResponse, SendEmailRequest, SendEmailResponse};

use axum::Router;
use folio_mailer::ContactRelay;
use std::path::PathBuf;
use std::sync::Arc;

/// Create the application router around an initialized [`ContactRelay`].
///
/// Defaults to the production environment and a `dist` static directory.
pub fn routes(relay: Arc<ContactRelay>) -> FolioRouterBuilder {
    FolioRouterBuilder {
        relay,
        environment: Environment::default(),
        static_dir: PathBuf::from("dist"),
    }
}

/// Builder for configuring the application router
pub struct FolioRouterBuilder {
    relay: Arc<ContactRelay>,
    environment: Environment,
    static_dir: PathBuf,
}

impl FolioRouterBuilder {
    /// Set the runtime environment, which controls error details in responses
    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the directory holding the built SPA (must contain `index.html`)
    pub fn static_dir(mut self, static_dir: impl Into<PathBuf>) -> Self {
        self.static_dir = static_dir.into();
        self
    }

    /// Build the router with the configured options
    pub fn build(self) -> Router {
        let state = AppState {
            relay: self.relay,
            environment: self.environment,
        };
        create_router(state, &self.static_dir)
    }
}

impl From<FolioRouterBuilder> for Router {
    fn from(builder: FolioRouterBuilder) -> Self {
        builder.build()
    }
}
