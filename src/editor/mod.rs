//! HTTP API for the external sitemap editor
//!
//! The API serves the stored sitemap, accepts whole-sitemap replacements
//! and regenerates the static site after every accepted replacement.
//! Replacements are validated in full before anything is written, and only
//! one replacement runs at a time.

mod routes;

pub use routes::{ApiError, StatusResponse};

use crate::config::Config;
use crate::PalimpsestError;
use axum::extract::DefaultBodyLimit;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Largest accepted request body
const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

/// Shared state of the editor API
#[derive(Debug)]
pub struct EditorState {
    pub config: Config,
    pub sitemap_path: PathBuf,
    pub output_dir: PathBuf,
    /// Held for the whole replace-and-regenerate sequence
    write_lock: Mutex<()>,
}

impl EditorState {
    pub fn new(config: Config) -> Self {
        Self {
            sitemap_path: PathBuf::from(&config.output.sitemap_path),
            output_dir: PathBuf::from(&config.render.output_dir),
            config,
            write_lock: Mutex::new(()),
        }
    }
}

/// Builds the CORS layer from the configured origins
fn cors_layer(origins: &[String]) -> Result<CorsLayer, PalimpsestError> {
    let origins = origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin.trim_end_matches('/'))
                .map_err(|e| PalimpsestError::Server(format!("invalid origin '{}': {}", origin, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]))
}

/// Builds the API router
pub fn router(state: Arc<EditorState>) -> Result<Router, PalimpsestError> {
    let cors = cors_layer(&state.config.editor.allowed_origins)?;

    Ok(Router::new()
        .route("/", get(routes::health))
        .route(
            "/api/sitemap",
            get(routes::get_sitemap).post(routes::update_sitemap),
        )
        .route("/api/status", get(routes::status))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Runs the editor API until the process is stopped
pub async fn serve(config: Config) -> Result<(), PalimpsestError> {
    let bind = config.editor.bind.clone();
    let state = Arc::new(EditorState::new(config));

    tracing::info!("Sitemap path: {}", state.sitemap_path.display());
    tracing::info!("Static output directory: {}", state.output_dir.display());

    let app = router(state)?;
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!("Editor API listening on {}", bind);

    axum::serve(listener, app)
        .await
        .map_err(|e| PalimpsestError::Server(e.to_string()))
}
