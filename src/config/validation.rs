use crate::config::types::{Config, EditorConfig, OutputConfig, RenderConfig, ScrapeConfig, SiteConfig};
use crate::ConfigError;
use std::net::SocketAddr;
use url::Url;

/// Upper bound on extraction threads
const MAX_WORKERS: usize = 256;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_scrape_config(&config.scrape)?;
    validate_output_config(&config.output)?;
    validate_render_config(&config.render)?;
    validate_editor_config(&config.editor)?;
    Ok(())
}

/// Validates the site identity
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_host(&config.host)?;

    if config.short_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "short-name cannot be empty".to_string(),
        ));
    }

    if config.home_key.is_empty() || config.home_key.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "home-key must be a non-empty relative page key, got '{}'",
            config.home_key
        )));
    }

    Ok(())
}

/// Validates the mirror scan configuration
fn validate_scrape_config(config: &ScrapeConfig) -> Result<(), ConfigError> {
    if config.root.is_empty() {
        return Err(ConfigError::Validation("root cannot be empty".to_string()));
    }

    if config.workers > MAX_WORKERS {
        return Err(ConfigError::Validation(format!(
            "workers must be between 0 and {}, got {}",
            MAX_WORKERS, config.workers
        )));
    }

    Ok(())
}

/// Validates output artifact paths
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    let paths = [
        ("sitemap-path", &config.sitemap_path),
        ("page-list-path", &config.page_list_path),
        ("graph-path", &config.graph_path),
        ("report-path", &config.report_path),
    ];

    for (name, value) in paths {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

/// Validates renderer configuration
fn validate_render_config(config: &RenderConfig) -> Result<(), ConfigError> {
    if config.output_dir.is_empty() {
        return Err(ConfigError::Validation(
            "output-dir cannot be empty".to_string(),
        ));
    }

    if config.logos.is_empty() || config.logos.iter().any(|l| l.is_empty()) {
        return Err(ConfigError::Validation(
            "logos must list at least one non-empty file name".to_string(),
        ));
    }

    Ok(())
}

/// Validates editor API configuration
fn validate_editor_config(config: &EditorConfig) -> Result<(), ConfigError> {
    config.bind.parse::<SocketAddr>().map_err(|e| {
        ConfigError::Validation(format!("Invalid bind address '{}': {}", config.bind, e))
    })?;

    for origin in &config.allowed_origins {
        let url = Url::parse(origin)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", origin, e)))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "Origin '{}' must use http or https",
                origin
            )));
        }
    }

    Ok(())
}

/// Validates a host name such as "pa-f.net"
fn validate_host(host: &str) -> Result<(), ConfigError> {
    if host.is_empty() {
        return Err(ConfigError::InvalidHost("Host cannot be empty".to_string()));
    }

    if !host
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidHost(format!(
            "Host '{}' contains invalid characters",
            host
        )));
    }

    if host.starts_with('.') || host.ends_with('.') || host.starts_with('-') || host.ends_with('-')
    {
        return Err(ConfigError::InvalidHost(format!(
            "Host '{}' cannot start or end with '.' or '-'",
            host
        )));
    }

    if host.contains("..") {
        return Err(ConfigError::InvalidHost(format!(
            "Host '{}' cannot contain consecutive dots",
            host
        )));
    }

    if !host.contains('.') {
        return Err(ConfigError::InvalidHost(format!(
            "Host '{}' must contain at least one dot (e.g., 'pa-f.net')",
            host
        )));
    }

    // The www. form is derived when stripping absolute links
    if host.starts_with("www.") {
        return Err(ConfigError::InvalidHost(format!(
            "Host '{}' must be given without the www. prefix",
            host
        )));
    }

    Ok(())
}
