//! Sitemap builder - scans a mirrored tree into a sitemap
//!
//! The scan runs in three phases:
//! - Walk the tree and compute each regular file's key
//! - Extract every file on a worker pool; each decision depends only on
//!   the file's own path and bytes
//! - Merge the outcomes into the sitemap on the calling thread

use crate::extract::{extract_file, skip_reason_for_path, ExtractContext, SkipReason};
use crate::sitemap::{PageRecord, Sitemap};
use crate::PalimpsestError;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Tally of a sitemap build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Regular files found under the root
    pub files_scanned: usize,

    /// Files that became pages
    pub pages_extracted: usize,

    /// Skipped files per reason
    pub skipped: BTreeMap<SkipReason, usize>,
}

impl BuildReport {
    /// Total number of skipped files
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Number of files skipped for `reason`
    pub fn skipped_for(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    fn record_skip(&mut self, reason: SkipReason) {
        *self.skipped.entry(reason).or_insert(0) += 1;
    }
}

/// Computes a file's page key: its path relative to `root`, `/`-separated
///
/// Returns `None` for the root itself or a path outside it.
pub fn page_key(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Builds a sitemap from the mirror rooted at `root`
///
/// # Arguments
///
/// * `root` - The scrape root directory
/// * `ctx` - Site identity used during extraction
/// * `workers` - Extraction threads; 0 means one per CPU
///
/// # Returns
///
/// * `Ok((Sitemap, BuildReport))` - The sitemap and a tally of the scan
/// * `Err(PalimpsestError)` - The root could not be read or the worker pool
///   could not be started
pub fn build_sitemap(
    root: &Path,
    ctx: &ExtractContext,
    workers: usize,
) -> Result<(Sitemap, BuildReport), PalimpsestError> {
    std::fs::read_dir(root).map_err(|source| PalimpsestError::ScrapeRoot {
        path: root.display().to_string(),
        source,
    })?;

    tracing::info!("Scanning mirror at {}", root.display());
    let files = collect_files(root);
    tracing::info!("Found {} files", files.len());

    let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
    let outcomes: Vec<(String, Result<PageRecord, SkipReason>)> = pool.install(|| {
        files
            .par_iter()
            .map(|(key, path)| (key.clone(), process_file(key, path, ctx)))
            .collect()
    });

    let mut sitemap = Sitemap::new();
    let mut report = BuildReport {
        files_scanned: files.len(),
        ..BuildReport::default()
    };

    for (key, outcome) in outcomes {
        match outcome {
            Ok(record) => {
                tracing::debug!("Extracted {}", key);
                sitemap.insert(key, record);
                report.pages_extracted += 1;
            }
            Err(reason) => {
                tracing::debug!("Skipping {} ({})", key, reason);
                report.record_skip(reason);
            }
        }
    }

    tracing::info!(
        "Build complete: {} pages extracted, {} files skipped",
        report.pages_extracted,
        report.total_skipped()
    );

    Ok((sitemap, report))
}

/// Walks the tree and returns `(key, path)` for every regular file
fn collect_files(root: &Path) -> Vec<(String, PathBuf)> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Cannot walk entry: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if let Some(key) = page_key(root, entry.path()) {
            files.push((key, entry.into_path()));
        }
    }

    files
}

/// Decides the outcome for one file
fn process_file(key: &str, path: &Path, ctx: &ExtractContext) -> Result<PageRecord, SkipReason> {
    // Path rules need no I/O
    if let Some(reason) = skip_reason_for_path(key) {
        return Err(reason);
    }

    let bytes = std::fs::read(path).map_err(|e| {
        tracing::warn!("Cannot read {}: {}", path.display(), e);
        SkipReason::Undecodable
    })?;

    extract_file(key, &bytes, ctx)
}
