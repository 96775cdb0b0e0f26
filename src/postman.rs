//! Postman v2.1 collection generation.
//!
//! Builds a downloadable collection from a repository's detected REST
//! specs: one folder per spec, one request per path+method found in the
//! document's `paths` object. A spec that no longer parses contributes
//! an empty folder.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use crate::detect::types::{RepositoryApiDetection, RestApiInfo};
use crate::error::{ApiScanError, Result};

const SCHEMA_URL: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// HTTP methods recognized as operations under an OpenAPI path item.
const METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Build a Postman collection for a catalogued repository.
///
/// `repo_root` is the repository's working directory; spec files are
/// re-read from there to enumerate paths.
pub fn build_collection(repo_root: &Path, detection: &RepositoryApiDetection) -> Result<Value> {
    if !detection.has_any_apis {
        return Err(ApiScanError::NoApis(detection.repository.clone()));
    }

    let folders: Vec<Value> = detection
        .rest_apis
        .iter()
        .map(|api| spec_folder(repo_root, api))
        .collect();

    Ok(json!({
        "info": {
            "name": format!("{} APIs", detection.repository),
            "description": format!("Generated by apiscan at {}", Utc::now().to_rfc3339()),
            "schema": SCHEMA_URL,
        },
        "item": folders,
    }))
}

/// One folder per REST spec, holding a request per path+method.
fn spec_folder(repo_root: &Path, api: &RestApiInfo) -> Value {
    let name = api
        .title
        .clone()
        .unwrap_or_else(|| api.file_path.display().to_string());

    let items = match read_document(repo_root, api) {
        Some(doc) => request_items(api, &doc),
        None => Vec::new(),
    };

    json!({
        "name": name,
        "item": items,
    })
}

fn read_document(repo_root: &Path, api: &RestApiInfo) -> Option<serde_yaml::Value> {
    let path = repo_root.join(&api.file_path);
    let content = match fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) => {
            debug!(file = %path.display(), error = %e, "spec unreadable, folder left empty");
            return None;
        }
    };
    match serde_yaml::from_str(&content) {
        Ok(doc) => Some(doc),
        Err(e) => {
            debug!(file = %path.display(), error = %e, "spec unparseable, folder left empty");
            None
        }
    }
}

fn request_items(api: &RestApiInfo, doc: &serde_yaml::Value) -> Vec<Value> {
    let base = api.servers.first().map(String::as_str).unwrap_or("");

    let paths = match doc.get("paths").and_then(serde_yaml::Value::as_mapping) {
        Some(paths) => paths,
        None => return Vec::new(),
    };

    let mut items = Vec::new();
    for (key, operations) in paths {
        let path = match key.as_str() {
            Some(p) => p,
            None => continue,
        };
        let operations = match operations.as_mapping() {
            Some(ops) => ops,
            None => continue,
        };

        for method in METHODS {
            let method_key = serde_yaml::Value::from(*method);
            let op = match operations.get(&method_key) {
                Some(op) => op,
                None => continue,
            };
            let method_upper = method.to_uppercase();
            let summary = op
                .get("summary")
                .and_then(serde_yaml::Value::as_str)
                .map(str::to_string);

            items.push(json!({
                "name": format!("{} {}", method_upper, path),
                "request": {
                    "method": method_upper,
                    "header": [],
                    "url": { "raw": format!("{}{}", base, path) },
                    "description": summary,
                },
            }));
        }
    }

    items
}
