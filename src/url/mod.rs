//! Link handling module for Palimpsest
//!
//! This module turns the raw anchor targets found on mirrored pages into
//! canonical page keys. Absolute same-site URLs are reduced to root-relative
//! form at extraction time; everything here operates on those relative
//! strings.

mod host;
mod matcher;
mod normalize;

// Re-export main functions
pub use host::strip_site_prefix;
pub use matcher::matches_path_prefix;
pub use normalize::{normalize_path, resolve_key};

/// Classification of a raw link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// Points into the mirrored site and may resolve to a page key
    Internal,
    /// Points to another site
    External,
    /// Carries a query string; never treated as a distinct page
    Excluded,
}

impl LinkClass {
    /// Returns true if the link may resolve to a page key
    pub fn is_resolvable(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Classifies a raw link as internal, external or excluded
///
/// Same-site absolute prefixes have already been stripped at extraction
/// time, so any remaining `http` prefix names another site. Query-bearing
/// links are trackers or pagination, never canonical pages.
///
/// # Examples
///
/// ```
/// use palimpsest::url::{classify_link, LinkClass};
///
/// assert_eq!(classify_link("https://other.org/"), LinkClass::External);
/// assert_eq!(classify_link("/tracker?page=2"), LinkClass::Excluded);
/// assert_eq!(classify_link("node/1.html"), LinkClass::Internal);
/// ```
pub fn classify_link(raw: &str) -> LinkClass {
    if raw.starts_with("http") {
        LinkClass::External
    } else if raw.contains('?') {
        LinkClass::Excluded
    } else {
        LinkClass::Internal
    }
}
