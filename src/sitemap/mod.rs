//! The sitemap: every extracted page keyed by its path in the mirror
//!
//! This module holds:
//! - `PageRecord` and `Sitemap`, the system's single persisted artifact
//! - The builder that scans a mirror into a sitemap
//! - JSON persistence, including validated whole-sitemap replacement

mod builder;
mod store;

pub use builder::{build_sitemap, page_key, BuildReport};
pub use store::{
    load_sitemap, parse_sitemap, replace_sitemap, save_sitemap, sitemap_digest, to_json,
};

use crate::url::resolve_key;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One extracted page
///
/// Serialized with the field names of the interchange format:
/// `title`, `md`, `date`, `image`, `links`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Human-readable page title, never empty
    pub title: String,

    /// Main content as markdown; may be empty
    #[serde(rename = "md")]
    pub body: String,

    /// Publish date as `YYYY-MM-DD`
    #[serde(default, deserialize_with = "optional_text")]
    pub date: Option<String>,

    /// Relative path of the page's only content image
    #[serde(default, deserialize_with = "optional_text")]
    pub image: Option<String>,

    /// Raw, unresolved anchor targets
    #[serde(default)]
    pub links: BTreeSet<String>,
}

/// Reads an optional string field, treating `null`, `false` and `""` as absent
///
/// Older sitemaps wrote `"image": false` for pages without an image.
fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Flag(#[allow(dead_code)] bool),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Text(text)) if !text.is_empty() => Some(text),
        _ => None,
    })
}

/// Describes why `key` cannot name a file below the output directory
///
/// Keys are relative paths: no leading `/`, and no empty, `.` or `..`
/// segments. Returns `None` for a usable key.
pub fn key_problem(key: &str) -> Option<&'static str> {
    if key.is_empty() {
        return Some("page key cannot be empty");
    }
    if key.starts_with('/') {
        return Some("page key must be a relative path");
    }
    key.split('/').find_map(|segment| match segment {
        "" => Some("page key cannot contain empty path segments"),
        "." | ".." => Some("page key cannot contain '.' or '..' segments"),
        _ => None,
    })
}

/// Mapping from page key to page record
///
/// Iteration follows key order, so every order-dependent output (ranked
/// lists, graph exports, the persisted JSON) is reproducible for a given
/// set of pages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sitemap {
    pages: BTreeMap<String, PageRecord>,
}

impl Sitemap {
    /// Creates an empty sitemap
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if the sitemap has no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Inserts a page, returning the record it replaced
    pub fn insert(&mut self, key: impl Into<String>, record: PageRecord) -> Option<PageRecord> {
        self.pages.insert(key.into(), record)
    }

    /// Looks up a page by key
    pub fn get(&self, key: &str) -> Option<&PageRecord> {
        self.pages.get(key)
    }

    /// Returns true if a page exists under `key`
    pub fn contains_key(&self, key: &str) -> bool {
        self.pages.contains_key(key)
    }

    /// Iterates over `(key, record)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PageRecord)> {
        self.pages.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates over page keys in key order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(|k| k.as_str())
    }

    /// Resolves a raw link found on `referring_key` to an existing page key
    ///
    /// Returns `None` for external, query-bearing and dead links.
    pub fn resolve_link(&self, raw: &str, referring_key: &str) -> Option<&str> {
        let candidate = resolve_key(raw, referring_key)?;
        self.pages
            .get_key_value(candidate.as_str())
            .map(|(key, _)| key.as_str())
    }

    /// `(key, image)` pairs for every page with a representative image
    pub fn images(&self) -> Vec<(&str, &str)> {
        self.pages
            .iter()
            .filter_map(|(key, page)| page.image.as_deref().map(|img| (key.as_str(), img)))
            .collect()
    }
}

impl FromIterator<(String, PageRecord)> for Sitemap {
    fn from_iter<I: IntoIterator<Item = (String, PageRecord)>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}
