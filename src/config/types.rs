use serde::Deserialize;

/// Main configuration structure for Palimpsest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    pub scrape: ScrapeConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

/// Identity of the mirrored site
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Host name of the original site (e.g., "pa-f.net")
    pub host: String,

    /// Short site name, used as the title of pages without a title prefix
    #[serde(rename = "short-name", default = "default_short_name")]
    pub short_name: String,

    /// Page key that the bare root link "/" refers to
    #[serde(rename = "home-key", default = "default_home_key")]
    pub home_key: String,
}

/// Mirror scan configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    /// Directory holding the mirrored HTML tree
    pub root: String,

    /// Extraction threads; 0 means one per CPU
    #[serde(default)]
    pub workers: usize,
}

/// Output artifact locations
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the persisted sitemap JSON
    #[serde(rename = "sitemap-path")]
    pub sitemap_path: String,

    /// Path to the ranked page list HTML
    #[serde(rename = "page-list-path", default = "default_page_list_path")]
    pub page_list_path: String,

    /// Path to the GraphViz export
    #[serde(rename = "graph-path", default = "default_graph_path")]
    pub graph_path: String,

    /// Path to the markdown analysis report
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,
}

/// Static site renderer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(rename = "output-dir", default = "default_output_dir")]
    pub output_dir: String,

    /// Optional HTML fragment shown in the sidebar of every page
    #[serde(rename = "sidebar-path", default)]
    pub sidebar_path: Option<String>,

    /// Seed for per-page cosmetic choices (logo, sidebar image)
    #[serde(default)]
    pub seed: u64,

    /// Logo file names, relative to the files directory
    #[serde(default = "default_logos")]
    pub logos: Vec<String>,

    /// Site-relative directory holding scraped images; defaults to "sites/<host>/files"
    #[serde(rename = "files-dir", default)]
    pub files_dir: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            sidebar_path: None,
            seed: 0,
            logos: default_logos(),
            files_dir: None,
        }
    }
}

/// Editor API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EditorConfig {
    /// Socket address the API listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Origins allowed to call the API from a browser
    #[serde(rename = "allowed-origins", default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl Config {
    /// Site-relative directory of scraped images
    pub fn files_dir(&self) -> String {
        self.render
            .files_dir
            .clone()
            .unwrap_or_else(|| format!("sites/{}/files", self.site.host))
    }
}

fn default_short_name() -> String {
    "pa-f".to_string()
}

fn default_home_key() -> String {
    "index.html".to_string()
}

fn default_page_list_path() -> String {
    "pages.html".to_string()
}

fn default_graph_path() -> String {
    "site.dot".to_string()
}

fn default_report_path() -> String {
    "analysis_report.md".to_string()
}

fn default_output_dir() -> String {
    "paf-static".to_string()
}

fn default_logos() -> Vec<String> {
    [
        "roundtable_logo.png",
        "paf-yellow.png",
        "paf-orange.png",
        "paf-pink.png",
        "paf-waves.png",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}
