//! Sitemap persistence
//!
//! The sitemap is stored as pretty-printed JSON. Keys and links are written
//! in sorted order, so rebuilding an unchanged mirror reproduces the file
//! byte for byte. Every write goes through a temporary file in the target
//! directory followed by a rename; readers never see a partial file.

use crate::sitemap::{key_problem, Sitemap};
use crate::SitemapError;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Fields every record must carry
const REQUIRED_FIELDS: [&str; 2] = ["title", "md"];

/// Serializes a sitemap to its canonical JSON text
pub fn to_json(sitemap: &Sitemap) -> Result<String, SitemapError> {
    let mut json = serde_json::to_string_pretty(sitemap)?;
    json.push('\n');
    Ok(json)
}

/// Writes a sitemap to `path` atomically
pub fn save_sitemap(sitemap: &Sitemap, path: &Path) -> Result<(), SitemapError> {
    let json = to_json(sitemap)?;
    write_atomically(path, json.as_bytes())?;
    tracing::info!("Saved {} pages to {}", sitemap.len(), path.display());
    Ok(())
}

/// Loads and validates a sitemap from `path`
pub fn load_sitemap(path: &Path) -> Result<Sitemap, SitemapError> {
    let text = std::fs::read_to_string(path)?;
    parse_sitemap(&text)
}

/// Parses and validates sitemap JSON
///
/// The document must be an object whose values are objects carrying string
/// `title` and `md` fields; keys and titles must be non-empty.
pub fn parse_sitemap(text: &str) -> Result<Sitemap, SitemapError> {
    let value: Value = serde_json::from_str(text)?;
    let pages = value.as_object().ok_or(SitemapError::NotAnObject)?;
    validate_pages(pages)?;
    Ok(serde_json::from_value(value)?)
}

/// Replaces the sitemap stored at `path` with `text`
///
/// The whole document is validated before anything is written. On any error
/// the stored file is left exactly as it was.
pub fn replace_sitemap(path: &Path, text: &str) -> Result<Sitemap, SitemapError> {
    let sitemap = parse_sitemap(text)?;
    save_sitemap(&sitemap, path)?;
    Ok(sitemap)
}

/// SHA-256 hex digest of the canonical JSON form
pub fn sitemap_digest(sitemap: &Sitemap) -> Result<String, SitemapError> {
    let json = to_json(sitemap)?;
    let mut hasher = Sha256::new();
    hasher.update(json.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Checks the structure of every record before deserialization
fn validate_pages(pages: &Map<String, Value>) -> Result<(), SitemapError> {
    for (key, record) in pages {
        if let Some(reason) = key_problem(key) {
            return Err(SitemapError::InvalidRecord {
                key: key.clone(),
                reason: reason.to_string(),
            });
        }

        let fields = record.as_object().ok_or_else(|| SitemapError::InvalidRecord {
            key: key.clone(),
            reason: "page data must be an object".to_string(),
        })?;

        for field in REQUIRED_FIELDS {
            match fields.get(field) {
                None => {
                    return Err(SitemapError::MissingField {
                        key: key.clone(),
                        field,
                    })
                }
                Some(Value::String(_)) => {}
                Some(_) => {
                    return Err(SitemapError::InvalidRecord {
                        key: key.clone(),
                        reason: format!("'{}' must be a string", field),
                    })
                }
            }
        }

        if fields
            .get("title")
            .and_then(Value::as_str)
            .is_some_and(|t| t.trim().is_empty())
        {
            return Err(SitemapError::InvalidRecord {
                key: key.clone(),
                reason: "title cannot be empty".to_string(),
            });
        }
    }

    Ok(())
}

/// Writes `bytes` to a temporary sibling of `path`, then renames it into place
fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), SitemapError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
