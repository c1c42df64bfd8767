//! Configuration module for Palimpsest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use palimpsest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("palimpsest.toml")).unwrap();
//! println!("Scraping mirror at: {}", config.scrape.root);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, EditorConfig, OutputConfig, RenderConfig, ScrapeConfig, SiteConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
