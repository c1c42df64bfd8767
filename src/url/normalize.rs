use crate::url::{classify_link, LinkClass};

/// Resolves a raw link into a candidate page key
///
/// # Resolution Steps
///
/// 1. External and query-bearing links never resolve
/// 2. Strip a single leading `/`
/// 3. A link starting with `../` is joined to a base derived from the
///    referring key and dot segments are collapsed:
///    - referring key names a file (`.` in its last segment): its directory
///    - otherwise: the referring key itself, joined with `/` even without
///      a trailing slash, so `a/b` + `../c.html` gives `a/c.html` rather
///      than the unmatchable `a/b../c.html` of plain string concatenation
///
/// Whether the candidate names an existing page is for the caller to decide
/// (see [`crate::sitemap::Sitemap::resolve_link`]).
///
/// # Examples
///
/// ```
/// use palimpsest::url::resolve_key;
///
/// assert_eq!(resolve_key("../c.html", "a/b.html"), Some("c.html".to_string()));
/// assert_eq!(resolve_key("../c.html", "a/b/"), Some("a/c.html".to_string()));
/// assert_eq!(resolve_key("/node/1.html", "x.html"), Some("node/1.html".to_string()));
/// assert_eq!(resolve_key("https://other.org/", "x.html"), None);
/// ```
pub fn resolve_key(raw: &str, referring_key: &str) -> Option<String> {
    if classify_link(raw) != LinkClass::Internal {
        return None;
    }

    let link = raw.strip_prefix('/').unwrap_or(raw);

    if !link.starts_with("../") {
        return Some(link.to_string());
    }

    let last_segment = referring_key.rsplit('/').next().unwrap_or_default();
    let base = if last_segment.contains('.') {
        match referring_key.rfind('/') {
            Some(idx) => &referring_key[..idx],
            None => "",
        }
    } else {
        referring_key
    };

    let joined = if base.is_empty() {
        link.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, link)
    } else {
        format!("{}/{}", base, link)
    };

    Some(normalize_path(&joined))
}

/// Normalizes a relative path by collapsing `.`, `..` and repeated separators
///
/// Follows POSIX `normpath` semantics for relative paths: a `..` that would
/// climb above the start is kept, and a trailing separator is dropped.
///
/// # Examples
///
/// ```
/// use palimpsest::url::normalize_path;
///
/// assert_eq!(normalize_path("a/../c.html"), "c.html");
/// assert_eq!(normalize_path("a//b/./c"), "a/b/c");
/// assert_eq!(normalize_path("../x"), "../x");
/// ```
pub fn normalize_path(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => continue,
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                // Cannot climb above the root of an absolute path
                _ if absolute => {}
                _ => segments.push(".."),
            },
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
