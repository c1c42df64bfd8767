//! Markdown to HTML conversion for rendered pages

use pulldown_cmark::{html, Options, Parser};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Headings that the scraper emitted as list items or indented, e.g. `* ## News`
static LIST_HEADING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\*? (#+)[ \t]*(.*)$").ok());

/// Collapses list-prefixed or indented heading lines to plain headings
pub fn fix_headings(md: &str) -> Cow<'_, str> {
    match LIST_HEADING.as_ref() {
        Some(re) => re.replace_all(md, "$1 $2"),
        None => Cow::Borrowed(md),
    }
}

/// Converts page markdown to an HTML fragment
pub fn markdown_to_html(md: &str) -> String {
    let fixed = fix_headings(md);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(&fixed, options);
    let mut out = String::with_capacity(md.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
