//! One-shot localization pass over an exported chat archive.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ArchiveLayout;
use crate::fetch::AssetFetcher;
use crate::rewrite::localize_document;

/// Summary of a completed localization run.
#[derive(Debug, Default)]
pub struct LocalizeSummary {
    /// Rewritten document paths, in processing order.
    pub documents: Vec<PathBuf>,
    /// Remote filenames downloaded during the run.
    pub downloads: Vec<String>,
}

/// High-level helper that rewrites every document in an archive.
#[derive(Debug)]
pub struct ArchiveLocalizer {
    layout: ArchiveLayout,
}

impl ArchiveLocalizer {
    /// Create a localizer for the provided archive layout.
    pub fn new(layout: ArchiveLayout) -> Self {
        Self { layout }
    }

    /// Process every `*.html` document in the input directory.
    ///
    /// Documents are visited in filesystem enumeration order. Each is parsed,
    /// rewritten, and written under its original filename into the output
    /// directory, leaving the input files untouched. The first fetch or
    /// filesystem failure aborts the run.
    pub fn run<F: AssetFetcher>(&self, fetcher: &F) -> Result<LocalizeSummary> {
        let layout = &self.layout;

        fs::create_dir_all(&layout.assets_dir)
            .with_context(|| format!("failed to create {}", layout.assets_dir.display()))?;
        fs::create_dir_all(&layout.output_dir)
            .with_context(|| format!("failed to create {}", layout.output_dir.display()))?;

        let entries = fs::read_dir(&layout.input_dir)
            .with_context(|| format!("failed to read {}", layout.input_dir.display()))?;

        let mut summary = LocalizeSummary::default();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("failed to scan {}", layout.input_dir.display()))?;
            let path = entry.path();
            if !is_html_file(&path) {
                continue;
            }
            let Some(file_name) = path.file_name() else {
                continue;
            };

            info!("processing {}", path.display());
            let html = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let outcome = localize_document(&html, layout, fetcher)?;

            let output_path = layout.output_dir.join(file_name);
            fs::write(&output_path, &outcome.html)
                .with_context(|| format!("failed to write {}", output_path.display()))?;
            info!("saved {}", output_path.display());

            summary.documents.push(output_path);
            summary.downloads.extend(outcome.downloads);
        }

        Ok(summary)
    }
}

fn is_html_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("html"))
}
