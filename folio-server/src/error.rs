use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use folio_mailer::RelayError;
use thiserror::Error;

use crate::{config::Environment, types::ErrorResponse};

/// Errors returned by the API, rendered as `{ success: false, error, details? }`.
///
/// `details` carries diagnostics and is only filled in development.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing required fields")]
    MissingFields { details: Option<String> },

    #[error("Invalid request body")]
    InvalidBody {
        status: StatusCode,
        details: Option<String>,
    },

    #[error("Failed to send email. Please try again later.")]
    SendFailed { details: Option<String> },

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn from_relay(err: RelayError, environment: Environment) -> Self {
        let details = environment.exposes_details().then(|| err.to_string());
        if err.is_client_error() {
            ApiError::MissingFields { details }
        } else {
            ApiError::SendFailed { details }
        }
    }

    pub fn from_rejection(rejection: JsonRejection, environment: Environment) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            details: environment.exposes_details().then(|| rejection.body_text()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::SendFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            ApiError::MissingFields { details }
            | ApiError::InvalidBody { details, .. }
            | ApiError::SendFailed { details } => details.clone(),
            ApiError::MethodNotAllowed => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            success: false,
            error: self.to_string(),
            details: self.details(),
        });

        (self.status(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use folio_mailer::MailerError;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = ApiError::from_relay(
            RelayError::Validation(vec!["message"]),
            Environment::Production,
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Missing required fields");
        assert!(err.details().is_none());
    }

    #[test]
    fn test_details_only_in_development() {
        let delivery = || RelayError::Delivery(MailerError::Verification("timed out".to_string()));

        let production = ApiError::from_relay(delivery(), Environment::Production);
        assert_eq!(production.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(production.details().is_none());

        let development = ApiError::from_relay(delivery(), Environment::Development);
        assert!(development.details().unwrap().contains("timed out"));
    }

    #[test]
    fn test_not_initialized_is_server_error() {
        let err = ApiError::from_relay(
            RelayError::NotInitialized("bad credentials".to_string()),
            Environment::Production,
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to send email. Please try again later.");
    }

    #[test]
    fn test_method_not_allowed_has_no_details() {
        let err = ApiError::MethodNotAllowed;
        assert_eq!(err.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(err.to_string(), "Method not allowed");
        assert!(err.details().is_none());
    }
}
