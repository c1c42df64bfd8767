/// Checks if a path, or any directory level within it, starts with a prefix
///
/// Mirrors may be rooted one level above the site directory, so a rule for
/// `files/` must also catch `pa-f.net/files/...`. Matching is anchored at a
/// segment boundary: `myfiles/x` does not match `files/`.
///
/// # Examples
///
/// ```
/// use palimpsest::url::matches_path_prefix;
///
/// assert!(matches_path_prefix("files/y.png", "files/"));
/// assert!(matches_path_prefix("a/book/export/x", "book/export"));
/// assert!(!matches_path_prefix("myfiles/y.png", "files/"));
/// ```
pub fn matches_path_prefix(path: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }

    path.starts_with(prefix) || path.contains(&format!("/{}", prefix))
}
