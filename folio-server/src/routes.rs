use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{HeaderValue, header},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use folio_mailer::{ContactRelay, ContactSubmission};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{
    config::Environment,
    error::{ApiError, Result},
    types::*,
};

const IMMUTABLE_ASSETS: &str = "public, max-age=31536000";

/// State shared by the API handlers.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<ContactRelay>,
    pub environment: Environment,
}

pub fn create_router(state: AppState, static_dir: &Path) -> Router {
    let api_routes = Router::new()
        .route(
            "/send-email",
            post(send_email_handler).fallback(method_not_allowed),
        )
        .route("/health", get(health_handler).fallback(method_not_allowed))
        .with_state(state);

    // Unknown paths get the SPA entry document; the client router takes over
    let spa = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));
    let static_routes = Router::new()
        .fallback_service(spa)
        .layer(middleware::map_response(set_cache_control));

    Router::new()
        .nest("/api", api_routes)
        .merge(static_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn send_email_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SendEmailRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let Json(request) =
        payload.map_err(|rejection| ApiError::from_rejection(rejection, state.environment))?;
    let submission = ContactSubmission::from(request);

    let sent = state
        .relay
        .send_contact_email(&submission)
        .await
        .map_err(|e| ApiError::from_relay(e, state.environment))?;

    Ok(Json(SendEmailResponse {
        success: true,
        message: "Email sent successfully".to_string(),
        message_id: sent.message_id,
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// HTML must be revalidated so new deploys are picked up; hashed assets are cached for a year.
async fn set_cache_control(mut response: Response) -> Response {
    if !response.status().is_success() || response.headers().contains_key(header::CACHE_CONTROL) {
        return response;
    }

    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"));

    let value = if is_html {
        HeaderValue::from_static("no-cache")
    } else {
        HeaderValue::from_static(IMMUTABLE_ASSETS)
    };
    response.headers_mut().insert(header::CACHE_CONTROL, value);
    response
}
