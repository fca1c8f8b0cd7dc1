use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use folio_types::api::{ContactResponse, InsertContactMessage};

use crate::error::ApiError;
use crate::{AppState, with_store};

pub async fn create_message(
    State(state): State<AppState>,
    Json(req): Json<InsertContactMessage>,
) -> Result<impl IntoResponse, ApiError> {
    let mut details = Vec::new();
    if req.name.trim().is_empty() {
        details.push("name is required".to_string());
    }
    if req.email.trim().is_empty() {
        details.push("email is required".to_string());
    } else if !is_valid_email(&req.email) {
        details.push("email is invalid".to_string());
    }
    if req.message.trim().is_empty() {
        details.push("message is required".to_string());
    }
    if !details.is_empty() {
        return Err(ApiError::Validation {
            message: "Invalid message data",
            details,
        });
    }

    with_store(&state, "Failed to send message", move |store| {
        store.create_contact_message(req)
    })
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message: "Message sent successfully",
        }),
    ))
}

pub async fn list_messages(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let messages = with_store(&state, "Failed to fetch messages", |store| {
        store.get_contact_messages()
    })
    .await?;

    Ok(Json(messages))
}

/// Syntactic check only: one `@`, non-empty local part, and a domain with
/// at least one interior dot.
fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@.co"));
        assert!(!is_valid_email("a@b.co."));
        assert!(!is_valid_email("a@b@c.co"));
        assert!(!is_valid_email("a b@c.co"));
        assert!(!is_valid_email(""));
    }
}
