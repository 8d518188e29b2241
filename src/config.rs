//! Archive configuration loader describing the localization layout.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

const DEFAULT_CONFIG_FILE: &str = "localize.config.json";

/// Discoverable configuration describing where the archive lives on disk and
/// which remote host should be localized.
///
/// Every field defaults to the layout produced by the chat platform's export
/// tooling, so an archive with no configuration file processes unchanged.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Directory (relative to the archive root) holding the exported HTML files.
    pub input_dir: String,
    /// Directory (relative to the archive root) receiving the rewritten HTML files.
    pub output_dir: String,
    /// Directory (relative to the archive root) receiving downloaded image assets.
    pub assets_dir: String,
    /// Hostname substring identifying images served from the platform CDN.
    pub cdn_host: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            input_dir: "original_html".into(),
            output_dir: ".".into(),
            assets_dir: "assets".into(),
            cdn_host: "cdn.discordapp.com".into(),
        }
    }
}

impl ArchiveConfig {
    /// Attempt to load configuration from the provided archive root.
    ///
    /// When the configuration file does not exist or fails to parse we fall back
    /// to default values so archives without one keep processing with the
    /// export tooling's fixed layout.
    pub fn discover(archive_root: &Path) -> Self {
        let candidate = archive_root.join(DEFAULT_CONFIG_FILE);
        Self::from_path(&candidate).unwrap_or_default()
    }

    /// Read configuration from a specific JSON file.
    pub fn from_path(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        serde_json::from_str(&content).ok()
    }

    /// Resolve the configured directory names against an archive root.
    pub fn into_layout(self, archive_root: &Path) -> ArchiveLayout {
        let asset_prefix = self
            .assets_dir
            .trim_matches('/')
            .replace('\\', "/")
            .to_string();

        ArchiveLayout {
            input_dir: archive_root.join(&self.input_dir),
            output_dir: archive_root.join(&self.output_dir),
            assets_dir: archive_root.join(&self.assets_dir),
            asset_prefix,
            cdn_host: self.cdn_host,
        }
    }
}

/// Resolved filesystem layout used by a localization run.
#[derive(Debug, Clone)]
pub struct ArchiveLayout {
    /// Directory scanned for `*.html` documents.
    pub input_dir: PathBuf,
    /// Directory where rewritten documents are written under their original names.
    pub output_dir: PathBuf,
    /// Directory where downloaded assets are stored, flat-named by remote filename.
    pub assets_dir: PathBuf,
    /// Relative prefix placed in rewritten `src` attributes, e.g. `assets`.
    pub asset_prefix: String,
    /// Hostname substring identifying CDN-served images.
    pub cdn_host: String,
}

impl ArchiveLayout {
    /// Local path an asset with the given remote filename would occupy.
    pub fn asset_path(&self, filename: &str) -> PathBuf {
        self.assets_dir.join(filename)
    }

    /// Relative `src` attribute value referencing a local asset.
    pub fn asset_src(&self, filename: &str) -> String {
        format!("{}/{}", self.asset_prefix, filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_export_tooling_layout() {
        let config = ArchiveConfig::default();
        assert_eq!(config.input_dir, "original_html");
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.assets_dir, "assets");
        assert_eq!(config.cdn_host, "cdn.discordapp.com");
    }

    #[test]
    fn discover_falls_back_to_defaults_for_missing_file() {
        let temp = tempdir().expect("failed to create temp dir");
        let config = ArchiveConfig::discover(temp.path());
        assert_eq!(config.cdn_host, "cdn.discordapp.com");
    }

    #[test]
    fn discover_reads_configuration_file() {
        let temp = tempdir().expect("failed to create temp dir");
        fs::write(
            temp.path().join(DEFAULT_CONFIG_FILE),
            r#"{"input_dir": "dump", "cdn_host": "cdn.example.net"}"#,
        )
        .expect("failed to write config");

        let config = ArchiveConfig::discover(temp.path());
        assert_eq!(config.input_dir, "dump");
        assert_eq!(config.cdn_host, "cdn.example.net");
        assert_eq!(config.assets_dir, "assets");
    }

    #[test]
    fn layout_resolves_against_archive_root() {
        let layout = ArchiveConfig::default().into_layout(Path::new("/archive"));
        assert_eq!(layout.input_dir, Path::new("/archive/original_html"));
        assert_eq!(layout.output_dir, Path::new("/archive/."));
        assert_eq!(
            layout.asset_path("123.png"),
            Path::new("/archive/assets/123.png")
        );
        assert_eq!(layout.asset_src("123.png"), "assets/123.png");
    }

    #[test]
    fn asset_prefix_is_normalised_for_src_attributes() {
        let config = ArchiveConfig {
            assets_dir: "media/".into(),
            ..ArchiveConfig::default()
        };
        let layout = config.into_layout(Path::new("/archive"));
        assert_eq!(layout.asset_src("file.png"), "media/file.png");
    }
}
