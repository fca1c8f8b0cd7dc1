use serde::{Deserialize, Serialize};

// -- Insert payloads --
//
// Fields of the HTTP-facing payloads take serde defaults so that a missing
// field reaches handler validation (which reports it by name) instead of
// being rejected during deserialization with an opaque error.

#[derive(Debug, Clone, Deserialize)]
pub struct InsertUser {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertProject {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: String,
    pub project_url: Option<String>,
    pub github_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsertContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

// -- Responses --

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Acknowledgment for a stored contact message. The created record is not
/// echoed back; the visitor only needs to know the message went through.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: &'static str,
}
