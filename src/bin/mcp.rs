//! apiscan MCP Server — API surface detection for AI agents.
//!
//! Runs a JSON-RPC 2.0 server over STDIO that exposes repository
//! scanning and the API catalog through the Model Context Protocol (MCP).
//!
//! Usage:
//!   apiscan-mcp [workspace_root]
//!
//! If no workspace root is given, uses the current working directory.
//! The catalog is loaded from the snapshot when present, otherwise
//! built by scanning the workspace, and saved on clean shutdown.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::info;

use apiscan::catalog::ApiCatalog;
use apiscan::config::ScanConfig;

fn main() {
    // Initialize tracing to stderr (MCP uses stdout for protocol)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Determine workspace root
    let workspace_root = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    info!(root = %workspace_root.display(), "apiscan MCP server starting");

    // Load config
    let apiscan_dir = workspace_root.join(".apiscan");
    let config = ScanConfig::load(&apiscan_dir.join("config.toml"));

    // Try to load cached catalog, or scan fresh
    let cache_path = config.resolve_cache_path(&apiscan_dir);
    let catalog = load_or_scan(&workspace_root, &cache_path, &config);

    // Wrap in Arc<RwLock> so the detect tool can insert concurrently
    let catalog = Arc::new(RwLock::new(catalog));

    info!("MCP server ready — waiting for JSON-RPC requests on stdin");

    // Run the MCP server loop (blocks until stdin closes)
    apiscan::mcp::server::run(Arc::clone(&catalog), config);

    save_on_shutdown(&catalog, &cache_path);
}

/// Save the catalog snapshot on clean shutdown.
fn save_on_shutdown(catalog: &RwLock<ApiCatalog>, cache_path: &Path) {
    let guard = match catalog.read() {
        Ok(g) => g,
        Err(e) => {
            tracing::warn!(error = %e, "catalog lock poisoned, snapshot not saved");
            return;
        }
    };
    if let Err(e) = guard.save(cache_path) {
        tracing::warn!(error = %e, "failed to save catalog on shutdown");
    } else {
        info!("catalog saved on shutdown");
    }
}

/// Load the catalog from its snapshot if available, otherwise scan the workspace.
fn load_or_scan(workspace_root: &Path, cache_path: &Path, config: &ScanConfig) -> ApiCatalog {
    if cache_path.exists() {
        info!(snapshot = %cache_path.display(), "loading catalog snapshot");
        match ApiCatalog::load(cache_path) {
            Ok(catalog) => {
                info!(repositories = catalog.len(), "catalog loaded from snapshot");
                return catalog;
            }
            Err(e) => {
                tracing::warn!(error = %e, "snapshot load failed, rescanning");
            }
        }
    }

    let mut catalog = ApiCatalog::new();
    match apiscan::detect::detect_workspace(workspace_root, config) {
        Ok(results) => {
            for detection in results {
                catalog.insert(detection);
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "workspace scan failed — starting with an empty catalog");
        }
    }

    // Try to save the snapshot
    if let Err(e) = catalog.save(cache_path) {
        tracing::warn!(error = %e, "failed to cache catalog");
    }

    catalog
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_save_on_shutdown_writes_snapshot() {
        let workspace = tempfile::tempdir().unwrap();
        let repo = workspace.path().join("svc");
        fs::create_dir(&repo).unwrap();
        fs::write(repo.join("openapi.yaml"), "openapi: 3.0.0\n").unwrap();

        let config = ScanConfig::default();
        let cache_path = workspace.path().join(".apiscan").join("catalog.bin");
        let catalog = RwLock::new(load_or_scan(workspace.path(), &cache_path, &config));
        assert_eq!(catalog.read().unwrap().len(), 1);

        fs::remove_file(&cache_path).unwrap();
        save_on_shutdown(&catalog, &cache_path);

        let reloaded = ApiCatalog::load(&cache_path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.get("svc").unwrap().has_any_apis);
    }

    #[test]
    fn test_load_or_scan_prefers_snapshot() {
        let workspace = tempfile::tempdir().unwrap();
        let cache_path = workspace.path().join(".apiscan").join("catalog.bin");

        ApiCatalog::new().save(&cache_path).unwrap();
        // An empty snapshot wins over a rescan of the (empty) workspace.
        let catalog = load_or_scan(workspace.path(), &cache_path, &ScanConfig::default());
        assert!(catalog.is_empty());
    }
}
