use folio_mailer::ContactSubmission;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/send-email`. Absent keys are treated like empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SendEmailRequest {
    pub from_name: Option<String>,
    pub from_email: Option<String>,
    pub message: Option<String>,
    pub to_email: Option<String>,
}

impl From<SendEmailRequest> for ContactSubmission {
    fn from(request: SendEmailRequest) -> Self {
        ContactSubmission::new(
            request.from_name.unwrap_or_default(),
            request.from_email.unwrap_or_default(),
            request.message.unwrap_or_default(),
            request.to_email.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendEmailResponse {
    pub success: bool,
    pub message: String,
    #[serde(rename = "messageId")]
    pub message_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
