//! Palimpsest: a mirrored-site re-publisher
//!
//! This crate scrapes a locally mirrored website into a single JSON sitemap,
//! analyzes the link graph between its pages, and re-renders the sitemap as
//! a new static site. A small editor API accepts whole-sitemap replacements.

pub mod analysis;
pub mod config;
pub mod editor;
pub mod extract;
pub mod render;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for Palimpsest operations
#[derive(Debug, Error)]
pub enum PalimpsestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    #[error("Cannot read scrape root {path}: {source}")]
    ScrapeRoot {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid host: {0}")]
    InvalidHost(String),
}

/// Errors raised while loading, saving or replacing a persisted sitemap
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Sitemap IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid sitemap JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sitemap must be a JSON object keyed by page path")]
    NotAnObject,

    #[error("Invalid page data for {key}: {reason}")]
    InvalidRecord { key: String, reason: String },

    #[error("Missing required field '{field}' for page {key}")]
    MissingField { key: String, field: &'static str },
}

/// Result type alias for Palimpsest operations
pub type Result<T> = std::result::Result<T, PalimpsestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for sitemap persistence operations
pub type SitemapResult<T> = std::result::Result<T, SitemapError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{extract_page, SkipReason};
pub use sitemap::{build_sitemap, BuildReport, PageRecord, Sitemap};
pub use url::{classify_link, resolve_key, LinkClass};
