use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use folio_mailer::{ContactRelay, Email, Mailer, MailerError};
use folio_server::Environment;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

// -- Mock transports ------------------------------------------------------

#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_email(&self, email: Email) -> Result<String, MailerError> {
        let id = email.message_id.clone();
        self.sent.lock().unwrap().push(email);
        Ok(id)
    }

    async fn verify(&self) -> Result<(), MailerError> {
        Ok(())
    }
}

struct RejectingMailer;

#[async_trait]
impl Mailer for RejectingMailer {
    async fn send_email(&self, _email: Email) -> Result<String, MailerError> {
        Err(MailerError::Verification(
            "550 mailbox unavailable".to_string(),
        ))
    }

    async fn verify(&self) -> Result<(), MailerError> {
        Ok(())
    }
}

// -- Helpers --------------------------------------------------------------

fn static_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("index.html"),
        "<!doctype html><div id=\"root\"></div>",
    )
    .unwrap();
    std::fs::create_dir(dir.path().join("assets")).unwrap();
    std::fs::write(dir.path().join("assets").join("app.js"), "console.log(1)").unwrap();
    dir
}

fn build_app(relay: ContactRelay, environment: Environment, static_dir: &Path) -> axum::Router {
    folio_server::routes(Arc::new(relay))
        .environment(environment)
        .static_dir(static_dir)
        .build()
}

fn send_email_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/send-email")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn ann() -> Value {
    json!({
        "from_name": "Ann",
        "from_email": "ann@x.com",
        "message": "Hi\nthere",
        "to_email": "me@y.com",
    })
}

// -- Send email -----------------------------------------------------------

#[tokio::test]
async fn send_email_success() {
    let dir = static_dir();
    let mailer = Arc::new(RecordingMailer::default());
    let relay = ContactRelay::new(mailer.clone(), "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let response = app.oneshot(send_email_request(ann())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Email sent successfully");

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(body["messageId"], sent[0].message_id.as_str());
    assert_eq!(sent[0].subject, "New message from Ann");
    assert_eq!(
        sent[0].text_body.as_deref(),
        Some("From: Ann (ann@x.com)\n\nMessage:\nHi\nthere")
    );
    assert_eq!(sent[0].reply_to.as_deref(), Some("ann@x.com"));
    assert_eq!(sent[0].from, "portfolio@example.com");
}

#[tokio::test]
async fn send_email_missing_message() {
    let dir = static_dir();
    let mailer = Arc::new(RecordingMailer::default());
    let relay = ContactRelay::new(mailer.clone(), "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let mut payload = ann();
    payload.as_object_mut().unwrap().remove("message");

    let response = app.oneshot(send_email_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "success": false, "error": "Missing required fields" })
    );
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn send_email_empty_field_is_missing() {
    let dir = static_dir();
    let relay = ContactRelay::new(Arc::new(RecordingMailer::default()), "portfolio@example.com");
    let app = build_app(relay, Environment::Development, dir.path());

    let mut payload = ann();
    payload["from_name"] = json!("");

    let response = app.oneshot(send_email_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Missing required fields");
    assert!(body["details"].as_str().unwrap().contains("sender_name"));
}

#[tokio::test]
async fn send_email_provider_failure_hides_details_in_production() {
    let dir = static_dir();
    let relay = ContactRelay::new(Arc::new(RejectingMailer), "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let response = app.oneshot(send_email_request(ann())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "success": false,
            "error": "Failed to send email. Please try again later.",
        })
    );
}

#[tokio::test]
async fn send_email_provider_failure_shows_details_in_development() {
    let dir = static_dir();
    let relay = ContactRelay::new(Arc::new(RejectingMailer), "portfolio@example.com");
    let app = build_app(relay, Environment::Development, dir.path());

    let response = app.oneshot(send_email_request(ann())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to send email. Please try again later.");
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .contains("550 mailbox unavailable")
    );
}

#[tokio::test]
async fn send_email_uninitialized_transport() {
    let dir = static_dir();
    let relay = ContactRelay::uninitialized("535 bad credentials", "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let response = app.oneshot(send_email_request(ann())).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to send email. Please try again later.");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn send_email_malformed_json() {
    let dir = static_dir();
    let relay = ContactRelay::new(Arc::new(RecordingMailer::default()), "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let request = Request::builder()
        .method("POST")
        .uri("/api/send-email")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert!(response.status().is_client_error());

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid request body");
}

#[tokio::test]
async fn send_email_non_string_field_is_invalid_body() {
    let dir = static_dir();
    let mailer = Arc::new(RecordingMailer::default());
    let relay = ContactRelay::new(mailer.clone(), "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let mut payload = ann();
    payload["message"] = json!(42);

    let response = app.oneshot(send_email_request(payload)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "success": false, "error": "Invalid request body" })
    );
    assert!(mailer.sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn send_email_wrong_method_uses_error_envelope() {
    let dir = static_dir();
    let relay = ContactRelay::new(Arc::new(RecordingMailer::default()), "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let response = app.oneshot(get("/api/send-email")).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({ "success": false, "error": "Method not allowed" })
    );
}

// -- Health ---------------------------------------------------------------

#[tokio::test]
async fn health_returns_iso_timestamp() {
    let dir = static_dir();
    let relay = ContactRelay::uninitialized("not configured", "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");

    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    assert!(timestamp.ends_with('Z'));
}

#[tokio::test]
async fn cross_origin_requests_are_allowed() {
    let dir = static_dir();
    let relay = ContactRelay::uninitialized("not configured", "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let request = Request::builder()
        .uri("/api/health")
        .header(header::ORIGIN, "https://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

// -- Static files ---------------------------------------------------------

#[tokio::test]
async fn unknown_paths_serve_spa_entry() {
    let dir = static_dir();
    let relay = ContactRelay::uninitialized("not configured", "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let response = app.oneshot(get("/projects/portfolio")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "no-cache"
    );
    assert!(body_text(response).await.contains("id=\"root\""));
}

#[tokio::test]
async fn assets_are_cached() {
    let dir = static_dir();
    let relay = ContactRelay::uninitialized("not configured", "portfolio@example.com");
    let app = build_app(relay, Environment::Production, dir.path());

    let response = app.oneshot(get("/assets/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=31536000"
    );
    assert_eq!(body_text(response).await, "console.log(1)");
}
