//! Scan configuration, loaded from `.apiscan/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Directory names that never contain hand-written API specs.
const DEFAULT_EXCLUDES: &[&str] = &[
    "node_modules",
    "target",
    "vendor",
    "dist",
    "build",
    "__pycache__",
];

/// Files larger than this are skipped without reading.
const DEFAULT_MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Tunables for a repository scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory names skipped during the walk (in addition to hidden
    /// directories and anything gitignored).
    pub exclude_dirs: Vec<String>,
    /// Maximum file size read during classification.
    pub max_file_bytes: u64,
    /// Catalog snapshot file name inside the `.apiscan` directory.
    pub cache_file: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            exclude_dirs: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            cache_file: "catalog.bin".to_string(),
        }
    }
}

impl ScanConfig {
    /// Load config from a TOML file. A missing file yields defaults;
    /// an unreadable or invalid file warns and yields defaults.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                warn!(config = %path.display(), error = %e, "config unreadable, using defaults");
                return Self::default();
            }
        };

        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!(config = %path.display(), error = %e, "config invalid, using defaults");
                Self::default()
            }
        }
    }

    /// Absolute path of the catalog snapshot inside the `.apiscan` dir.
    pub fn resolve_cache_path(&self, apiscan_dir: &Path) -> PathBuf {
        apiscan_dir.join(&self.cache_file)
    }

    /// Whether a directory name is on the exclude list.
    pub fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert!(config.is_excluded_dir("node_modules"));
        assert!(config.is_excluded_dir("target"));
        assert!(!config.is_excluded_dir("src"));
        assert_eq!(config.cache_file, "catalog.bin");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = ScanConfig::load(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "max_file_bytes = 1024").unwrap();

        let config = ScanConfig::load(&path);
        assert_eq!(config.max_file_bytes, 1024);
        // Unspecified fields keep their defaults.
        assert!(config.is_excluded_dir("vendor"));
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_file_bytes = \"lots\"").unwrap();

        let config = ScanConfig::load(&path);
        assert_eq!(config.max_file_bytes, DEFAULT_MAX_FILE_BYTES);
    }

    #[test]
    fn test_cache_path_resolution() {
        let config = ScanConfig::default();
        let path = config.resolve_cache_path(Path::new("/repo/.apiscan"));
        assert_eq!(path, PathBuf::from("/repo/.apiscan/catalog.bin"));
    }
}
