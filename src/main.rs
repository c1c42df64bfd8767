//! Palimpsest main entry point
//!
//! This is the command-line interface for the Palimpsest site re-publisher.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use palimpsest::analysis::{
    content_statistics, find_pages_by_keyword, print_statistics, write_graph,
    write_markdown_report, write_page_list,
};
use palimpsest::config::{load_config_with_hash, Config};
use palimpsest::extract::ExtractContext;
use palimpsest::render::SiteGenerator;
use palimpsest::sitemap::{build_sitemap, load_sitemap, save_sitemap, sitemap_digest, Sitemap};
use palimpsest::SkipReason;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Palimpsest: re-publish a mirrored website
///
/// Palimpsest scrapes a locally mirrored site into a JSON sitemap, analyzes
/// the links between its pages, and renders the sitemap as a new static
/// site. Without a mode flag it builds the sitemap.
#[derive(Parser, Debug)]
#[command(name = "palimpsest")]
#[command(version)]
#[command(about = "Scrape, analyze and re-render a mirrored website", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be scanned without scanning
    #[arg(long, group = "mode")]
    dry_run: bool,

    /// Show statistics of the stored sitemap and exit
    #[arg(long, group = "mode")]
    stats: bool,

    /// Write the popularity-ranked page list
    #[arg(long, group = "mode")]
    list: bool,

    /// Write the link graph in DOT format
    #[arg(long, group = "mode")]
    graph: bool,

    /// Write the markdown analysis report
    #[arg(long, group = "mode")]
    report: bool,

    /// Search the stored sitemap for a keyword
    #[arg(long, value_name = "KEYWORD", group = "mode")]
    search: Option<String>,

    /// Generate the static site
    #[arg(long, group = "mode")]
    render: bool,

    /// Run the editor API
    #[arg(long, group = "mode")]
    serve: bool,

    /// Earliest date listed in the report (inclusive)
    #[arg(long, value_name = "YYYY-MM-DD")]
    since: Option<NaiveDate>,

    /// Latest date listed in the report (inclusive)
    #[arg(long, value_name = "YYYY-MM-DD")]
    until: Option<NaiveDate>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load configuration from {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
    } else if cli.stats {
        handle_stats(&config)?;
    } else if cli.list {
        handle_list(&config)?;
    } else if cli.graph {
        handle_graph(&config)?;
    } else if cli.report {
        handle_report(&config, cli.since, cli.until)?;
    } else if let Some(keyword) = &cli.search {
        handle_search(&config, keyword)?;
    } else if cli.render {
        handle_render(&config)?;
    } else if cli.serve {
        palimpsest::editor::serve(config)
            .await
            .context("editor API stopped")?;
    } else {
        handle_build(&config)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("palimpsest=info,warn"),
            1 => EnvFilter::new("palimpsest=debug,info"),
            2 => EnvFilter::new("palimpsest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the stored sitemap named in the configuration
fn load_stored_sitemap(config: &Config) -> Result<Sitemap> {
    let path = Path::new(&config.output.sitemap_path);
    load_sitemap(path).with_context(|| format!("failed to load sitemap from {}", path.display()))
}

/// Handles the --dry-run mode: validates config and shows what would be scanned
fn handle_dry_run(config: &Config) {
    println!("=== Palimpsest Dry Run ===\n");

    println!("Site:");
    println!("  Host: {}", config.site.host);
    println!("  Short name: {}", config.site.short_name);
    println!("  Home key: {}", config.site.home_key);

    println!("\nScrape:");
    println!("  Root: {}", config.scrape.root);
    if config.scrape.workers == 0 {
        println!("  Workers: one per CPU");
    } else {
        println!("  Workers: {}", config.scrape.workers);
    }

    println!("\nOutput:");
    println!("  Sitemap: {}", config.output.sitemap_path);
    println!("  Page list: {}", config.output.page_list_path);
    println!("  Graph: {}", config.output.graph_path);
    println!("  Report: {}", config.output.report_path);

    println!("\nRender:");
    println!("  Output directory: {}", config.render.output_dir);
    println!(
        "  Sidebar: {}",
        config.render.sidebar_path.as_deref().unwrap_or("(none)")
    );
    println!("  Files directory: {}", config.files_dir());
    println!("  Seed: {}", config.render.seed);
    println!("  Logos ({}):", config.render.logos.len());
    for logo in &config.render.logos {
        println!("    - {}", logo);
    }

    println!("\nEditor:");
    println!("  Bind: {}", config.editor.bind);
    println!("  Allowed origins: {}", config.editor.allowed_origins.join(", "));

    println!("\n✓ Configuration is valid");
    let root = Path::new(&config.scrape.root);
    if root.is_dir() {
        println!("✓ Would scan mirror at {}", root.display());
    } else {
        println!("✗ Scrape root {} is not a readable directory", root.display());
    }
}

/// Handles the default mode: builds and saves the sitemap
fn handle_build(config: &Config) -> Result<()> {
    let ctx = ExtractContext::from_config(config);
    let root = Path::new(&config.scrape.root);

    let (sitemap, report) = build_sitemap(root, &ctx, config.scrape.workers)
        .with_context(|| format!("failed to build sitemap from {}", root.display()))?;

    let path = Path::new(&config.output.sitemap_path);
    save_sitemap(&sitemap, path)
        .with_context(|| format!("failed to save sitemap to {}", path.display()))?;

    println!("=== Build Report ===\n");
    println!("  Files scanned: {}", report.files_scanned);
    println!("  Pages extracted: {}", report.pages_extracted);
    println!("  Files skipped: {}", report.total_skipped());
    for reason in SkipReason::ALL {
        let count = report.skipped_for(reason);
        if count > 0 {
            println!("    {}: {}", reason, count);
        }
    }
    println!("\n✓ Sitemap saved to: {}", path.display());

    Ok(())
}

/// Handles the --stats mode: shows statistics of the stored sitemap
fn handle_stats(config: &Config) -> Result<()> {
    println!("Sitemap: {}\n", config.output.sitemap_path);

    let sitemap = load_stored_sitemap(config)?;
    let digest = sitemap_digest(&sitemap)?;
    print_statistics(&content_statistics(&sitemap), &digest);

    Ok(())
}

/// Handles the --list mode: writes the ranked page list
fn handle_list(config: &Config) -> Result<()> {
    let sitemap = load_stored_sitemap(config)?;
    let path = Path::new(&config.output.page_list_path);
    let count = write_page_list(&sitemap, &config.site.host, path)
        .with_context(|| format!("failed to write page list to {}", path.display()))?;

    println!("✓ Page list of {} pages written to: {}", count, path.display());
    Ok(())
}

/// Handles the --graph mode: writes the DOT link graph
fn handle_graph(config: &Config) -> Result<()> {
    let sitemap = load_stored_sitemap(config)?;
    let path = Path::new(&config.output.graph_path);
    write_graph(&sitemap, &config.site.home_key, path)
        .with_context(|| format!("failed to write graph to {}", path.display()))?;

    println!("✓ Graph written to: {}", path.display());
    Ok(())
}

/// Handles the --report mode: writes the markdown analysis report
fn handle_report(config: &Config, since: Option<NaiveDate>, until: Option<NaiveDate>) -> Result<()> {
    if let (Some(since), Some(until)) = (since, until) {
        if since > until {
            anyhow::bail!("--since {} is after --until {}", since, until);
        }
    }

    let sitemap = load_stored_sitemap(config)?;
    let path = Path::new(&config.output.report_path);
    write_markdown_report(&sitemap, since, until, path)
        .with_context(|| format!("failed to write report to {}", path.display()))?;

    println!("✓ Report written to: {}", path.display());
    Ok(())
}

/// Handles the --search mode: prints matching pages by relevance
fn handle_search(config: &Config, keyword: &str) -> Result<()> {
    let sitemap = load_stored_sitemap(config)?;
    let hits = find_pages_by_keyword(&sitemap, keyword);

    if hits.is_empty() {
        println!("No pages match '{}'", keyword);
        return Ok(());
    }

    println!("Pages matching '{}' ({}):\n", keyword, hits.len());
    for hit in &hits {
        println!("  {:>4}  {}  ({})", hit.score, hit.title, hit.key);
    }

    Ok(())
}

/// Handles the --render mode: generates the static site
fn handle_render(config: &Config) -> Result<()> {
    let sitemap = load_stored_sitemap(config)?;
    let generator = SiteGenerator::from_config(config)?;
    let written = generator.generate(&sitemap)?;

    println!(
        "✓ Static site of {} pages generated in: {}",
        written,
        generator.output_dir().display()
    );
    Ok(())
}
