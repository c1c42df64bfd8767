//! HTML to Markdown conversion
//!
//! Headings, lists, emphasis, links and images must survive a round trip
//! through a markdown renderer, so conversion is delegated to `htmd`.

use htmd::options::{HeadingStyle, Options};
use htmd::HtmlToMarkdown;
use scraper::{ElementRef, Html};

/// Tags whose content never belongs in page text
const SKIPPED_TAGS: [&str; 3] = ["script", "style", "noscript"];

/// Converts an HTML fragment to markdown
///
/// Falls back to the fragment's plain text if the converter fails.
pub fn html_to_markdown(html: &str) -> String {
    let converter = HtmlToMarkdown::builder()
        .options(Options {
            heading_style: HeadingStyle::Atx,
            ..Default::default()
        })
        .skip_tags(SKIPPED_TAGS.to_vec())
        .build();

    match converter.convert(html) {
        Ok(markdown) => markdown,
        Err(e) => {
            tracing::warn!("Markdown conversion failed, keeping plain text: {}", e);
            Html::parse_fragment(html)
                .root_element()
                .text()
                .collect::<String>()
        }
    }
}

/// Converts an element, including its own tag, to markdown
pub fn element_to_markdown(element: &ElementRef<'_>) -> String {
    html_to_markdown(&element.html())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_keep_levels() {
        let md = html_to_markdown("<h1>One</h1><h3>Three</h3>");
        assert!(md.contains("# One"));
        assert!(md.contains("### Three"));
    }

    #[test]
    fn test_lists_and_emphasis() {
        let md = html_to_markdown("<ul><li>first</li><li><em>second</em></li></ul><p><strong>bold</strong></p>");
        assert!(md.contains("first"));
        assert!(md.contains("*second*") || md.contains("_second_"));
        assert!(md.contains("**bold**"));
    }

    #[test]
    fn test_links_and_images() {
        let md = html_to_markdown(
            r#"<p><a href="../program.html">events</a> <img src="sites/pa-f.net/files/a.jpg" alt="A"></p>"#,
        );
        assert!(md.contains("[events](../program.html)"));
        assert!(md.contains("![A](sites/pa-f.net/files/a.jpg)"));
    }

    #[test]
    fn test_scripts_dropped() {
        let md = html_to_markdown("<div><script>alert(1)</script><p>text</p></div>");
        assert!(!md.contains("alert"));
        assert!(md.contains("text"));
    }

    #[test]
    fn test_element_to_markdown() {
        let document = Html::parse_document(r#"<div class="content"><h2>Title</h2></div>"#);
        let selector = scraper::Selector::parse(".content").unwrap();
        let element = document.select(&selector).next().unwrap();
        assert!(element_to_markdown(&element).contains("## Title"));
    }
}
