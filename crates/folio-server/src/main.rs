use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::info;

use folio_storage::{DbStorage, MemStorage, SharedStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let host = std::env::var("FOLIO_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("FOLIO_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;
    let db_path = std::env::var("FOLIO_DB_PATH").unwrap_or_else(|_| "folio.db".into());
    let storage_kind = std::env::var("FOLIO_STORAGE").unwrap_or_else(|_| "sqlite".into());
    let static_dir =
        PathBuf::from(std::env::var("FOLIO_STATIC_DIR").unwrap_or_else(|_| "public".into()));

    // Storage backend, injected into the API as a trait object
    let store: SharedStorage = match storage_kind.as_str() {
        "memory" => {
            info!("Using in-memory storage (nothing will be persisted)");
            Arc::new(MemStorage::new())
        }
        _ => Arc::new(DbStorage::open(&PathBuf::from(&db_path))?),
    };

    // Non-API routes serve the static site, with index.html as the
    // fallback for client-side section navigation.
    let static_site = ServeDir::new(&static_dir)
        .fallback(ServeFile::new(static_dir.join("index.html")));

    let app = folio_api::router(store)
        .fallback_service(static_site)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Folio server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
