pub mod contact;
pub mod error;
pub mod health;
pub mod projects;

use axum::Router;
use axum::routing::get;
use tracing::error;

use folio_storage::{SharedStorage, Storage};

use crate::error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStorage,
}

/// The `/api` routes. The caller owns the storage instance and decides
/// which backend sits behind the trait object.
pub fn router(store: SharedStorage) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/api/health", get(health::health))
        .route(
            "/api/projects",
            get(projects::list_projects).post(projects::create_project),
        )
        .route("/api/projects/{id}", get(projects::get_project))
        .route(
            "/api/contact",
            get(contact::list_messages).post(contact::create_message),
        )
        .with_state(state)
}

/// Run a storage call on the blocking pool. `context` doubles as the
/// public error message; the underlying failure is only logged.
pub(crate) async fn with_store<T, F>(
    state: &AppState,
    context: &'static str,
    f: F,
) -> Result<T, ApiError>
where
    F: FnOnce(&dyn Storage) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || f(store.as_ref()))
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal(context)
        })?
        .map_err(|e| {
            error!("{}: {}", context, e);
            ApiError::Internal(context)
        })
}
