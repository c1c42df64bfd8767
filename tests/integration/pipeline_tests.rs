use palimpsest::analysis::{
    graph_dot, incoming_counts, pages_by_date_range, ranked_pages, render_page_list,
};
use palimpsest::config::parse_config;
use palimpsest::extract::{extract_html, ExtractContext};
use palimpsest::render::{markdown_to_html, SiteGenerator};
use palimpsest::sitemap::{
    build_sitemap, load_sitemap, replace_sitemap, save_sitemap, sitemap_digest,
};
use palimpsest::SkipReason;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn article(title: &str, submitted: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>{title} | pa-f</title></head><body>
        <div class="node">
          <span class="submitted">Submitted on {submitted}</span>
          <div class="content">{body}</div>
        </div>
        </body></html>"#
    )
}

/// Creates a mirror with a home page, three articles and assorted artifacts
fn create_mirror(root: &Path) {
    write(
        root,
        "index.html",
        r#"<html><head><title>pa-f</title></head><body>
        <div class="node"><div class="content">
          <p>Welcome to <a href="https://pa-f.net/basics.html">PAF</a>.</p>
          <p><a href="node/1.html">News</a> and <a href="http://www.pa-f.net/node/2.html">more</a>.</p>
          <p><a href="mailto:info@pa-f.net">mail us</a> or <a href="https://elsewhere.org/">elsewhere</a>.</p>
        </div></div>
        </body></html>"#,
    );
    write(
        root,
        "basics.html",
        &article(
            "Basics",
            "2009-04-01",
            r#"<h2>How it works</h2><ul><li>sleep</li><li>work</li></ul>
            <img src="./sites/pa-f.net/files/house.jpg">
            <a href="/">home</a> <a href="basics/directions.html">directions</a>"#,
        ),
    );
    write(
        root,
        "basics/directions.html",
        &article(
            "Directions",
            "2010-08-15",
            r#"<p>Take the train. <a href="../basics.html">Back</a> or <a href="../node/1.html">news</a>.</p>"#,
        ),
    );
    write(
        root,
        "node/1.html",
        &article(
            "Summer news",
            "2011-06-02",
            r#"<p>The summer program. <a href="../basics.html">basics</a> <a href="../missing.html">gone</a></p>"#,
        ),
    );
    write(
        root,
        "node/2.html",
        r#"<html><head><title>Listing | pa-f</title></head><body>
        <div class="node"><h2 class="title">First</h2><div class="content"><p>one</p><img src="a.jpg"></div></div>
        <div class="node"><h2 class="title">Second</h2><div class="content"><p>two</p></div></div>
        <div class="pager"><a href="node/2.html?page=1">next</a></div>
        </body></html>"#,
    );

    // Artifacts that must never become pages
    write(root, "book/export/html/1", &article("Print", "2011-01-01", "<p>x</p>"));
    write(root, "image/tid/3?size=thumbnail", &article("Thumb", "2011-01-01", "<p>x</p>"));
    write(root, "tracker?page=4", &article("Tracker", "2011-01-01", "<p>x</p>"));
    write(root, "sites/pa-f.net/files/notes.html", &article("File", "2011-01-01", "<p>x</p>"));
    write(root, "robots.txt", "User-agent: *\n");
}

fn ctx() -> ExtractContext {
    ExtractContext::new("pa-f.net", "pa-f")
}

#[test]
fn test_build_from_mirror() {
    let dir = TempDir::new().unwrap();
    create_mirror(dir.path());

    let (sitemap, report) = build_sitemap(dir.path(), &ctx(), 0).unwrap();

    let keys: Vec<&str> = sitemap.keys().collect();
    assert_eq!(
        keys,
        vec!["basics.html", "basics/directions.html", "index.html", "node/1.html", "node/2.html"]
    );

    assert_eq!(report.files_scanned, 10);
    assert_eq!(report.pages_extracted, 5);
    assert_eq!(report.skipped_for(SkipReason::PrinterExport), 1);
    assert_eq!(report.skipped_for(SkipReason::SizedVariant), 1);
    assert_eq!(report.skipped_for(SkipReason::Tracker), 1);
    assert_eq!(report.skipped_for(SkipReason::FileAsset), 1);
    assert_eq!(report.skipped_for(SkipReason::NoTitle), 1);

    let home = sitemap.get("index.html").unwrap();
    assert_eq!(home.title, "pa-f");
    assert_eq!(home.date, None);
    let links: Vec<&str> = home.links.iter().map(String::as_str).collect();
    assert_eq!(
        links,
        vec!["/basics.html", "/node/2.html", "https://elsewhere.org/", "node/1.html"]
    );

    let basics = sitemap.get("basics.html").unwrap();
    assert_eq!(basics.date.as_deref(), Some("2009-04-01"));
    assert_eq!(basics.image.as_deref(), Some("sites/pa-f.net/files/house.jpg"));
    assert!(basics.body.contains("How it works"));

    let listing = sitemap.get("node/2.html").unwrap();
    assert_eq!(listing.image, None);
    assert!(listing.body.find("First").unwrap() < listing.body.find("two").unwrap());
    assert!(listing.body.contains("next"));
}

#[test]
fn test_rebuild_is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let mirror = dir.path().join("pa-f.net");
    create_mirror(&mirror);

    let first_path = dir.path().join("first.json");
    let second_path = dir.path().join("second.json");

    let (first, _) = build_sitemap(&mirror, &ctx(), 1).unwrap();
    save_sitemap(&first, &first_path).unwrap();
    let (second, _) = build_sitemap(&mirror, &ctx(), 8).unwrap();
    save_sitemap(&second, &second_path).unwrap();

    assert_eq!(fs::read(&first_path).unwrap(), fs::read(&second_path).unwrap());
    assert_eq!(sitemap_digest(&first).unwrap(), sitemap_digest(&second).unwrap());
    assert_eq!(load_sitemap(&first_path).unwrap(), first);
}

#[test]
fn test_analysis_of_built_sitemap() {
    let dir = TempDir::new().unwrap();
    create_mirror(dir.path());
    let (sitemap, _) = build_sitemap(dir.path(), &ctx(), 2).unwrap();

    let counts = incoming_counts(&sitemap);
    // index, directions and node/1 link to basics
    assert_eq!(counts.get("basics.html"), Some(&3));
    // index and directions link to node/1
    assert_eq!(counts.get("node/1.html"), Some(&2));
    assert_eq!(counts.get("basics/directions.html"), Some(&1));
    assert_eq!(counts.get("node/2.html"), Some(&1));
    // "/" resolves to the empty key, which is not a page
    assert_eq!(counts.get("index.html"), None);
    assert!(!counts.contains_key("missing.html"));

    let ranked = ranked_pages(&sitemap, &counts);
    let order: Vec<&str> = ranked.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(
        order,
        vec!["basics.html", "node/1.html", "basics/directions.html", "node/2.html", "index.html"]
    );

    let list = render_page_list(&ranked, "pa-f.net");
    assert!(list.contains("<a href='https://pa-f.net/basics' target='_blank'>Basics</a> <small>(3)</small>"));
    assert!(list.contains("<a href='https://pa-f.net/' target='_blank'>pa-f</a> <small>(0)</small>"));

    let dot = graph_dot(&sitemap, "index.html");
    assert!(dot.contains("basics_html [label=\"Basics\"];"));
    assert!(dot.contains("basics_html -> index_html;"));
    assert!(dot.contains("index_html -> node_1_html;"));
    assert!(!dot.contains("elsewhere"));

    let dated = pages_by_date_range(&sitemap, None, None);
    let dated_keys: Vec<&str> = dated.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(dated_keys, vec!["node/1.html", "basics/directions.html", "basics.html"]);
}

#[test]
fn test_replace_then_render() {
    let dir = TempDir::new().unwrap();
    let mirror = dir.path().join("mirror");
    create_mirror(&mirror);
    fs::create_dir_all(mirror.join("sites/pa-f.net/files")).unwrap();

    let sitemap_path = dir.path().join("sitemap.json");
    let (sitemap, _) = build_sitemap(&mirror, &ctx(), 2).unwrap();
    save_sitemap(&sitemap, &sitemap_path).unwrap();
    let before = fs::read(&sitemap_path).unwrap();

    // A replacement with one incomplete record is rejected as a whole
    let rejected = replace_sitemap(
        &sitemap_path,
        r#"{"index.html": {"title": "Home", "md": "hi"}, "x.html": {"title": "X"}}"#,
    );
    assert!(rejected.is_err());
    assert_eq!(fs::read(&sitemap_path).unwrap(), before);

    let config = parse_config(&format!(
        r#"
[site]
host = "pa-f.net"

[scrape]
root = "{mirror}"

[output]
sitemap-path = "{sitemap}"

[render]
output-dir = "{out}"
seed = 3
"#,
        mirror = mirror.display(),
        sitemap = sitemap_path.display(),
        out = dir.path().join("site").display()
    ))
    .unwrap();

    let loaded = load_sitemap(&sitemap_path).unwrap();
    let generator = SiteGenerator::from_config(&config).unwrap();
    assert_eq!(generator.generate(&loaded).unwrap(), 5);

    let directions = fs::read_to_string(dir.path().join("site/basics/directions.html")).unwrap();
    assert!(directions.contains("<title>Directions | pa-f</title>"));
    assert!(directions.contains("<a href=\"../index.html\">home</a>"));
    assert!(directions.contains("2010-08-15"));

    let again = fs::read_to_string(dir.path().join("site/basics/directions.html")).unwrap();
    generator.generate(&loaded).unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("site/basics/directions.html")).unwrap(),
        again
    );
}

#[test]
fn test_extracted_markdown_renders_back_to_same_structure() {
    let html = article(
        "Schedule",
        "2012-05-06",
        r#"<h3>Daily plan</h3>
        <ul><li>one</li><li>two</li></ul>
        <p>Come <em>early</em> and read the <a href="../program.html">program</a>.</p>
        <p><img src="sites/pa-f.net/files/a.jpg" alt="A"></p>"#,
    );

    let record = extract_html(&html, &ctx()).unwrap();
    let rendered = markdown_to_html(&record.body);

    assert!(rendered.contains("<h3>Daily plan</h3>"), "{}", rendered);
    assert!(rendered.contains("<ul>"), "{}", rendered);
    assert!(rendered.contains("<li>one</li>"), "{}", rendered);
    assert!(rendered.contains("<li>two</li>"), "{}", rendered);
    assert!(rendered.contains("<em>early</em>"), "{}", rendered);
    assert!(rendered.contains(r#"<a href="../program.html">program</a>"#), "{}", rendered);
    assert!(rendered.contains(r#"<img src="sites/pa-f.net/files/a.jpg" alt="A""#), "{}", rendered);
}
