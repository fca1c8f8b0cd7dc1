use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use folio_types::api::InsertProject;

use crate::error::ApiError;
use crate::{AppState, with_store};

pub async fn list_projects(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let projects = with_store(&state, "Failed to fetch projects", |store| {
        store.get_projects()
    })
    .await?;

    Ok(Json(projects))
}

/// The id arrives as a raw path segment so a malformed value maps to the
/// API's own 400 body instead of an extractor rejection.
pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let id: i64 = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid project ID"))?;

    let project = with_store(&state, "Failed to fetch project", move |store| {
        store.get_project(id)
    })
    .await?
    .ok_or(ApiError::NotFound("Project not found"))?;

    Ok(Json(project))
}

pub async fn create_project(
    State(state): State<AppState>,
    Json(req): Json<InsertProject>,
) -> Result<impl IntoResponse, ApiError> {
    if req.title.trim().is_empty() {
        return Err(ApiError::Validation {
            message: "Invalid project data",
            details: vec!["title is required".to_string()],
        });
    }

    let project = with_store(&state, "Failed to create project", move |store| {
        store.create_project(req)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(project)))
}
