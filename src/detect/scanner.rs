//! Repository scanner — walks a repository tree and classifies API files.
//!
//! Walks candidate files respecting .gitignore, classifies each by
//! extension and content markers, and assembles the repository's
//! detection result. A failure on one file is logged and skipped, never
//! fatal to the scan.

use ignore::WalkBuilder;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::types::{
    ApiKind, ButtonKind, GraphqlApiInfo, GrpcApiInfo, RepositoryApiDetection, RestApiInfo,
};
use super::{classifier, graphql, grpc, rest};
use crate::config::ScanConfig;
use crate::error::{ApiScanError, Result};

/// Scan one repository directory. The repository name is the
/// directory's file name.
pub fn detect_repository(root: &Path, config: &ScanConfig) -> Result<RepositoryApiDetection> {
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| root.display().to_string());
    detect_repository_named(root, &name, config)
}

/// Scan one repository directory under an explicit name.
pub fn detect_repository_named(
    root: &Path,
    name: &str,
    config: &ScanConfig,
) -> Result<RepositoryApiDetection> {
    if !root.is_dir() {
        return Err(ApiScanError::NotADirectory(root.to_path_buf()));
    }

    let files = collect_candidates(root, config);

    let rest_apis: Mutex<Vec<RestApiInfo>> = Mutex::new(Vec::new());
    let graphql_apis: Mutex<Vec<GraphqlApiInfo>> = Mutex::new(Vec::new());
    let grpc_apis: Mutex<Vec<GrpcApiInfo>> = Mutex::new(Vec::new());

    files.par_iter().for_each(|path| {
        // Non-UTF8 and unreadable files are skipped here.
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                debug!(file = %path.display(), error = %e, "file skipped");
                return;
            }
        };

        let relative = path.strip_prefix(root).unwrap_or(path);
        match classifier::classify(path, &content) {
            Some(ApiKind::Rest) => {
                if let Ok(mut list) = rest_apis.lock() {
                    list.push(rest::extract(relative, &content));
                }
            }
            Some(ApiKind::Graphql) => {
                if let Ok(mut list) = graphql_apis.lock() {
                    list.push(graphql::extract(relative, &content));
                }
            }
            Some(ApiKind::Grpc) => {
                if let Ok(mut list) = grpc_apis.lock() {
                    list.push(grpc::extract(relative, &content));
                }
            }
            None => {}
        }
    });

    let mut rest_apis = rest_apis.into_inner().unwrap_or_default();
    let mut graphql_apis = graphql_apis.into_inner().unwrap_or_default();
    let mut grpc_apis = grpc_apis.into_inner().unwrap_or_default();

    // The parallel walk is unordered; sort so results are deterministic.
    rest_apis.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    graphql_apis.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    grpc_apis.sort_by(|a, b| a.file_path.cmp(&b.file_path));

    let buttons = recommend_buttons(rest_apis.len(), graphql_apis.len(), grpc_apis.len());
    let has_any_apis = !buttons.is_empty();

    info!(
        repository = name,
        rest = rest_apis.len(),
        graphql = graphql_apis.len(),
        grpc = grpc_apis.len(),
        "scan complete"
    );

    Ok(RepositoryApiDetection {
        repository: name.to_string(),
        rest_apis,
        graphql_apis,
        grpc_apis,
        has_any_apis,
        buttons,
        detected_at: Utc::now(),
    })
}

/// Scan every immediate child directory of `root` as a repository.
///
/// Hidden and excluded directories are skipped; a repository whose scan
/// fails is logged and skipped.
pub fn detect_workspace(root: &Path, config: &ScanConfig) -> Result<Vec<RepositoryApiDetection>> {
    if !root.is_dir() {
        return Err(ApiScanError::NotADirectory(root.to_path_buf()));
    }

    let mut results = Vec::new();
    let entries = fs::read_dir(root).map_err(|e| ApiScanError::io(root, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ApiScanError::io(root, e))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || config.is_excluded_dir(&name) {
            continue;
        }
        match detect_repository_named(&path, &name, config) {
            Ok(detection) => results.push(detection),
            Err(e) => warn!(repository = %name, error = %e, "repository scan failed, skipped"),
        }
    }

    results.sort_by(|a, b| a.repository.cmp(&b.repository));
    Ok(results)
}

/// Map detection counts to explorer affordances.
///
/// Order is fixed: swagger, graphql, grpc, postman. Postman is present
/// whenever any API exists.
pub fn recommend_buttons(rest: usize, graphql: usize, grpc: usize) -> Vec<ButtonKind> {
    let mut buttons = Vec::new();
    if rest > 0 {
        buttons.push(ButtonKind::Swagger);
    }
    if graphql > 0 {
        buttons.push(ButtonKind::Graphql);
    }
    if grpc > 0 {
        buttons.push(ButtonKind::Grpc);
    }
    if !buttons.is_empty() {
        buttons.push(ButtonKind::Postman);
    }
    buttons
}

/// Walk the tree and collect readable candidate files.
fn collect_candidates(root: &Path, config: &ScanConfig) -> Vec<PathBuf> {
    let excludes = config.exclude_dirs.clone();
    let max_bytes = config.max_file_bytes;

    WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .filter_entry(move |entry| {
            if entry.depth() == 0 {
                return true;
            }
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            if is_dir {
                if let Some(name) = entry.file_name().to_str() {
                    if excludes.iter().any(|d| d == name) {
                        return false;
                    }
                }
            }
            true
        })
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| classifier::is_candidate(entry.path()))
        .filter(|entry| {
            entry
                .metadata()
                .map(|m| m.len() <= max_bytes)
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect()
}
