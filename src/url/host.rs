/// Reduces an absolute same-site URL to its root-relative form
///
/// The mirrored site was published under three absolute forms:
/// `https://<host>`, `http://<host>` and `http://www.<host>`. A link carrying
/// one of these prefixes is rewritten to the remainder of the URL. A link
/// naming the bare host becomes `/`. Any other link is returned unchanged.
///
/// # Examples
///
/// ```
/// use palimpsest::url::strip_site_prefix;
///
/// assert_eq!(strip_site_prefix("https://pa-f.net/node/1.html", "pa-f.net"), "/node/1.html");
/// assert_eq!(strip_site_prefix("http://www.pa-f.net", "pa-f.net"), "/");
/// assert_eq!(strip_site_prefix("https://other.org/x", "pa-f.net"), "https://other.org/x");
/// ```
pub fn strip_site_prefix(href: &str, host: &str) -> String {
    let prefixes = [
        format!("https://{}", host),
        format!("http://{}", host),
        format!("http://www.{}", host),
    ];

    for prefix in &prefixes {
        if let Some(rest) = href.strip_prefix(prefix.as_str()) {
            // "https://pa-f.net.evil.org" is another host, not a prefix match
            if rest.is_empty() {
                return "/".to_string();
            }
            if rest.starts_with(['/', '?', '#']) {
                return rest.to_string();
            }
        }
    }

    href.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "pa-f.net";

    #[test]
    fn test_strip_https() {
        assert_eq!(strip_site_prefix("https://pa-f.net/basics.html", HOST), "/basics.html");
    }

    #[test]
    fn test_strip_http() {
        assert_eq!(strip_site_prefix("http://pa-f.net/node/25153", HOST), "/node/25153");
    }

    #[test]
    fn test_strip_http_www() {
        assert_eq!(strip_site_prefix("http://www.pa-f.net/links.html", HOST), "/links.html");
    }

    #[test]
    fn test_bare_host_becomes_root() {
        assert_eq!(strip_site_prefix("https://pa-f.net", HOST), "/");
        assert_eq!(strip_site_prefix("https://pa-f.net/", HOST), "/");
    }

    #[test]
    fn test_query_after_host_kept() {
        assert_eq!(strip_site_prefix("https://pa-f.net?q=1", HOST), "?q=1");
    }

    #[test]
    fn test_other_hosts_unchanged() {
        assert_eq!(
            strip_site_prefix("https://www.pa-f.net/x", HOST),
            "https://www.pa-f.net/x"
        );
        assert_eq!(
            strip_site_prefix("https://pa-f.net.example.org/x", HOST),
            "https://pa-f.net.example.org/x"
        );
        assert_eq!(strip_site_prefix("../c.html", HOST), "../c.html");
    }
}
