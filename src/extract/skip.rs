//! Skip decisions for mirrored files
//!
//! The mirror contains many artifacts that must never become pages. Path
//! rules are checked before a file is even read; the remaining reasons are
//! produced by the extractor itself.

use crate::url::matches_path_prefix;
use std::fmt;

/// Why a mirrored file contributed nothing to the sitemap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    // ===== Path rules =====
    /// Printer-friendly export of a book page
    PrinterExport,

    /// Resized variant of an asset (`size=` in the path)
    SizedVariant,

    /// Activity tracker query page
    Tracker,

    /// Raw uploaded file
    FileAsset,

    // ===== Content rules =====
    /// File is not valid UTF-8 text
    Undecodable,

    /// Document has no `<title>` element
    NoTitle,

    /// Document has no content, gallery or images block
    NoContent,
}

impl SkipReason {
    /// All reasons, in decision order
    pub const ALL: [SkipReason; 7] = [
        Self::PrinterExport,
        Self::SizedVariant,
        Self::Tracker,
        Self::FileAsset,
        Self::Undecodable,
        Self::NoTitle,
        Self::NoContent,
    ];

    /// Returns true if the reason was decided from the path alone
    pub fn is_path_rule(&self) -> bool {
        matches!(
            self,
            Self::PrinterExport | Self::SizedVariant | Self::Tracker | Self::FileAsset
        )
    }

    /// Short, stable label for logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrinterExport => "printer-export",
            Self::SizedVariant => "sized-variant",
            Self::Tracker => "tracker",
            Self::FileAsset => "file-asset",
            Self::Undecodable => "undecodable",
            Self::NoTitle => "no-title",
            Self::NoContent => "no-content",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applies the path rules to a file path relative to the scrape root
///
/// Returns the first matching rule, or `None` if the file should be parsed.
///
/// # Examples
///
/// ```
/// use palimpsest::extract::{skip_reason_for_path, SkipReason};
///
/// assert_eq!(skip_reason_for_path("files/y.png"), Some(SkipReason::FileAsset));
/// assert_eq!(skip_reason_for_path("node/1.html"), None);
/// ```
pub fn skip_reason_for_path(path: &str) -> Option<SkipReason> {
    if matches_path_prefix(path, "book/export") {
        return Some(SkipReason::PrinterExport);
    }

    if path.contains("size=") {
        return Some(SkipReason::SizedVariant);
    }

    if matches_path_prefix(path, "tracker?") {
        return Some(SkipReason::Tracker);
    }

    if matches_path_prefix(path, "files/") {
        return Some(SkipReason::FileAsset);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_exclusion_class() {
        assert_eq!(
            skip_reason_for_path("a/book/export/x"),
            Some(SkipReason::PrinterExport)
        );
        assert_eq!(
            skip_reason_for_path("b?size=100"),
            Some(SkipReason::SizedVariant)
        );
        assert_eq!(skip_reason_for_path("tracker?x=1"), Some(SkipReason::Tracker));
        assert_eq!(skip_reason_for_path("files/y.png"), Some(SkipReason::FileAsset));
    }

    #[test]
    fn test_rules_match_under_site_directory() {
        assert_eq!(
            skip_reason_for_path("book/export/html/3"),
            Some(SkipReason::PrinterExport)
        );
        assert_eq!(
            skip_reason_for_path("sites/pa-f.net/files/a.jpg"),
            Some(SkipReason::FileAsset)
        );
    }

    #[test]
    fn test_content_pages_not_skipped() {
        assert_eq!(skip_reason_for_path("index.html"), None);
        assert_eq!(skip_reason_for_path("node/25153.html"), None);
        assert_eq!(skip_reason_for_path("basics/directions.html"), None);
        assert_eq!(skip_reason_for_path("image.html"), None);
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(
            skip_reason_for_path("book/export/files/x?size=2"),
            Some(SkipReason::PrinterExport)
        );
    }

    #[test]
    fn test_path_rule_flag() {
        for reason in SkipReason::ALL {
            let expected = !matches!(
                reason,
                SkipReason::Undecodable | SkipReason::NoTitle | SkipReason::NoContent
            );
            assert_eq!(reason.is_path_rule(), expected, "{}", reason);
        }
    }
}
