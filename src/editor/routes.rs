//! Editor API handlers

use crate::editor::EditorState;
use crate::render::SiteGenerator;
use crate::sitemap::{load_sitemap, replace_sitemap, Sitemap};
use crate::{PalimpsestError, SitemapError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Error response carrying a `detail` message
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

/// Body of `GET /api/status`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub sitemap_exists: bool,
    pub sitemap_path: String,
    pub sitemap_size: usize,
    pub static_dir_exists: bool,
    pub static_dir_path: String,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "message": "Palimpsest editor API is running" }))
}

pub async fn get_sitemap(State(state): State<Arc<EditorState>>) -> Result<Json<Sitemap>, ApiError> {
    if !state.sitemap_path.exists() {
        return Err(ApiError::new(StatusCode::NOT_FOUND, "Sitemap file not found"));
    }

    let sitemap = load_sitemap(&state.sitemap_path).map_err(|e| {
        tracing::error!("Stored sitemap is unreadable: {}", e);
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error reading sitemap: {}", e),
        )
    })?;

    Ok(Json(sitemap))
}

/// Replaces the stored sitemap with the request body and regenerates the site
///
/// A body that fails validation yields 400 and leaves the stored sitemap
/// untouched.
pub async fn update_sitemap(
    State(state): State<Arc<EditorState>>,
    body: String,
) -> Result<Json<Value>, ApiError> {
    let _guard = state.write_lock.lock().await;

    let worker_state = Arc::clone(&state);
    let outcome = tokio::task::spawn_blocking(move || replace_and_regenerate(&worker_state, &body))
        .await
        .map_err(|e| {
            ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error updating sitemap: {}", e),
            )
        })?;

    match outcome {
        Ok(pages) => {
            tracing::info!("Sitemap replaced, {} pages regenerated", pages);
            Ok(Json(json!({
                "message": "Sitemap updated and static site regenerated successfully"
            })))
        }
        Err(PalimpsestError::Sitemap(e)) if is_rejection(&e) => {
            tracing::warn!("Rejected sitemap replacement: {}", e);
            Err(ApiError::new(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Err(e) => {
            tracing::error!("Sitemap update failed: {}", e);
            Err(ApiError::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error updating sitemap: {}", e),
            ))
        }
    }
}

pub async fn status(State(state): State<Arc<EditorState>>) -> Result<Json<StatusResponse>, ApiError> {
    let sitemap_exists = state.sitemap_path.exists();
    let sitemap_size = if sitemap_exists {
        load_sitemap(&state.sitemap_path)
            .map_err(|e| {
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error getting status: {}", e),
                )
            })?
            .len()
    } else {
        0
    };

    Ok(Json(StatusResponse {
        sitemap_exists,
        sitemap_path: state.sitemap_path.display().to_string(),
        sitemap_size,
        static_dir_exists: state.output_dir.exists(),
        static_dir_path: state.output_dir.display().to_string(),
    }))
}

/// Errors caused by the submitted document rather than the server
fn is_rejection(e: &SitemapError) -> bool {
    matches!(
        e,
        SitemapError::Json(_)
            | SitemapError::NotAnObject
            | SitemapError::InvalidRecord { .. }
            | SitemapError::MissingField { .. }
    )
}

fn replace_and_regenerate(state: &EditorState, body: &str) -> Result<usize, PalimpsestError> {
    let sitemap = replace_sitemap(&state.sitemap_path, body)?;
    let generator = SiteGenerator::from_config(&state.config)?;
    generator.generate(&sitemap)
}
