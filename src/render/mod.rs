//! Static site generation from a sitemap
//!
//! Every page of the sitemap is written to `<output-dir>/<key>` as a full
//! HTML document with shared navigation and sidebar chrome. All links in
//! the chrome are relative, so the output can be served from any prefix or
//! opened straight from disk.

mod markdown;
mod template;

pub use markdown::{fix_headings, markdown_to_html};
pub use template::{escape_html, render_page, PageView, NAV_LINKS};

use crate::config::Config;
use crate::sitemap::{key_problem, Sitemap};
use crate::PalimpsestError;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Returns `../` once per directory level of `key`
///
/// # Examples
///
/// ```
/// use palimpsest::render::relative_root;
///
/// assert_eq!(relative_root("index.html"), "");
/// assert_eq!(relative_root("basics/directions.html"), "../");
/// ```
pub fn relative_root(key: &str) -> String {
    "../".repeat(key.split('/').count() - 1)
}

/// Deterministically picks an index below `len` for a page
///
/// The choice is a pure function of `(seed, purpose, key)`.
pub fn seeded_choice(seed: u64, purpose: &str, key: &str, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    hasher.update(purpose.as_bytes());
    hasher.update([0]);
    hasher.update(key.as_bytes());
    let digest = hasher.finalize();

    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    Some((u64::from_le_bytes(bytes) % len as u64) as usize)
}

/// Reads the sidebar fragment; a missing file yields an empty sidebar
pub fn load_sidebar(path: Option<&Path>) -> std::io::Result<String> {
    let Some(path) = path else {
        return Ok(String::new());
    };

    match std::fs::read_to_string(path) {
        Ok(html) => Ok(html),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("Sidebar file {} not found", path.display());
            Ok(String::new())
        }
        Err(e) => Err(e),
    }
}

/// Static site generator
#[derive(Debug, Clone)]
pub struct SiteGenerator {
    output_dir: PathBuf,
    source_root: PathBuf,
    host: String,
    short_name: String,
    home_key: String,
    files_dir: String,
    logos: Vec<String>,
    seed: u64,
    sidebar: String,
}

impl SiteGenerator {
    /// Creates a generator from the configuration, loading the sidebar
    pub fn from_config(config: &Config) -> Result<Self, PalimpsestError> {
        let sidebar = load_sidebar(config.render.sidebar_path.as_deref().map(Path::new))?;

        Ok(Self {
            output_dir: PathBuf::from(&config.render.output_dir),
            source_root: PathBuf::from(&config.scrape.root),
            host: config.site.host.clone(),
            short_name: config.site.short_name.clone(),
            home_key: config.site.home_key.clone(),
            files_dir: config.files_dir(),
            logos: config.render.logos.clone(),
            seed: config.render.seed,
            sidebar,
        })
    }

    /// Directory the site is written to
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Renders the HTML for a single page
    ///
    /// Returns `None` if `key` is not in the sitemap.
    pub fn render(&self, sitemap: &Sitemap, key: &str) -> Option<String> {
        self.render_with_images(sitemap, key, &sitemap.images())
    }

    fn render_with_images(
        &self,
        sitemap: &Sitemap,
        key: &str,
        images: &[(&str, &str)],
    ) -> Option<String> {
        let page = sitemap.get(key)?;
        let root = relative_root(key);

        let sidebar_html = self.sidebar.replace(&format!("https://{}/", self.host), &root);

        let logo = seeded_choice(self.seed, "logo", key, self.logos.len())
            .map(|i| format!("{}/{}", self.files_dir, self.logos[i]))
            .unwrap_or_default();

        let feature = seeded_choice(self.seed, "image", key, images.len()).map(|i| images[i]);

        let body_html = markdown_to_html(&page.body);

        Some(render_page(&PageView {
            title: &page.title,
            date: page.date.as_deref(),
            show_heading: page.title != self.short_name,
            body_html: &body_html,
            root: &root,
            short_name: &self.short_name,
            home_key: &self.home_key,
            logo: &logo,
            feature,
            sidebar_html: &sidebar_html,
        }))
    }

    /// Writes every page of the sitemap to the output directory
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of pages written
    /// * `Err(PalimpsestError)` - The sitemap is empty, a key would land
    ///   outside the output directory, or a write failed
    pub fn generate(&self, sitemap: &Sitemap) -> Result<usize, PalimpsestError> {
        if sitemap.is_empty() {
            return Err(PalimpsestError::Render(
                "sitemap has no pages to render".to_string(),
            ));
        }

        if let Some((key, reason)) = sitemap
            .keys()
            .find_map(|key| key_problem(key).map(|reason| (key, reason)))
        {
            return Err(PalimpsestError::Render(format!(
                "refusing to render {:?}: {}",
                key, reason
            )));
        }

        std::fs::create_dir_all(&self.output_dir)?;
        self.link_files_dir()?;

        let images = sitemap.images();
        let mut written = 0;
        for key in sitemap.keys() {
            let Some(html) = self.render_with_images(sitemap, key, &images) else {
                continue;
            };

            let path = self.output_dir.join(key);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, html)?;
            tracing::debug!("Rendered {}", key);
            written += 1;
        }

        tracing::info!(
            "Static site generated in {} ({} pages)",
            self.output_dir.display(),
            written
        );
        Ok(written)
    }

    /// Links the scraped files directory into the output
    ///
    /// Nothing happens if the link target exists already or the source is
    /// missing.
    #[cfg(unix)]
    fn link_files_dir(&self) -> std::io::Result<()> {
        let source = self.source_root.join(&self.files_dir);
        let dest = self.output_dir.join(&self.files_dir);

        if dest.symlink_metadata().is_ok() || !source.exists() {
            return Ok(());
        }

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let source = std::fs::canonicalize(source)?;
        std::os::unix::fs::symlink(&source, &dest)?;
        tracing::info!("Linked {} to {}", dest.display(), source.display());
        Ok(())
    }

    #[cfg(not(unix))]
    fn link_files_dir(&self) -> std::io::Result<()> {
        tracing::debug!("Skipping files directory link on this platform");
        Ok(())
    }
}
