//! REST/OpenAPI metadata extraction.
//!
//! Parses the document (YAML or JSON) and scrapes `info.title`,
//! `info.version`, `info.description`, and `servers[].url`. Parsing is
//! best-effort: a document that carries the marker but fails to parse
//! still classifies as REST, just with no metadata.

use std::path::Path;

use serde_yaml::Value;
use tracing::debug;

use super::types::RestApiInfo;

/// Scrape REST metadata from a classified spec file.
///
/// `file_path` is stored as given (the scanner passes repository-relative
/// paths); `content` is the full document text.
pub fn extract(file_path: &Path, content: &str) -> RestApiInfo {
    let mut api = RestApiInfo {
        file_path: file_path.to_path_buf(),
        title: None,
        version: None,
        description: None,
        servers: Vec::new(),
    };

    let doc = match parse_document(file_path, content) {
        Some(doc) => doc,
        None => {
            debug!(file = %file_path.display(), "spec carries marker but does not parse");
            return api;
        }
    };

    if let Some(info) = doc.get("info") {
        api.title = string_field(info, "title");
        api.version = string_field(info, "version");
        api.description = string_field(info, "description");
    }

    if let Some(servers) = doc.get("servers").and_then(Value::as_sequence) {
        api.servers = servers
            .iter()
            .filter_map(|server| string_field(server, "url"))
            .collect();
    }

    // Swagger 2.0 has `host`/`basePath` instead of `servers`.
    if api.servers.is_empty() {
        if let Some(host) = doc.get("host").and_then(Value::as_str) {
            let base = doc.get("basePath").and_then(Value::as_str).unwrap_or("");
            api.servers.push(format!("{}{}", host, base));
        }
    }

    api
}

/// Parse a spec document. JSON specs go through `serde_json` first;
/// everything else (and lenient fallback) through `serde_yaml`.
fn parse_document(file_path: &Path, content: &str) -> Option<Value> {
    let is_json = file_path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "json");

    if is_json {
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(content) {
            return serde_yaml::to_value(json).ok();
        }
    }
    serde_yaml::from_str(content).ok()
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extract_openapi_yaml() {
        let content = r#"
openapi: 3.0.3
info:
  title: Pet Store API
  version: 1.4.2
  description: Manage pets.
servers:
  - url: https://api.pets.internal/v1
  - url: https://staging.pets.internal/v1
paths: {}
"#;
        let api = extract(&PathBuf::from("api/openapi.yaml"), content);
        assert_eq!(api.title.as_deref(), Some("Pet Store API"));
        assert_eq!(api.version.as_deref(), Some("1.4.2"));
        assert_eq!(api.description.as_deref(), Some("Manage pets."));
        assert_eq!(api.servers.len(), 2);
        assert_eq!(api.servers[0], "https://api.pets.internal/v1");
    }

    #[test]
    fn test_extract_openapi_json() {
        let content = r#"{
  "openapi": "3.1.0",
  "info": { "title": "Orders", "version": "2.0.0" },
  "paths": {}
}"#;
        let api = extract(&PathBuf::from("orders.json"), content);
        assert_eq!(api.title.as_deref(), Some("Orders"));
        assert_eq!(api.version.as_deref(), Some("2.0.0"));
        assert!(api.description.is_none());
        assert!(api.servers.is_empty());
    }

    #[test]
    fn test_extract_swagger_2_host() {
        let content = r#"
swagger: "2.0"
info:
  title: Legacy
  version: "1.0"
host: legacy.internal
basePath: /api
"#;
        let api = extract(&PathBuf::from("swagger.yml"), content);
        assert_eq!(api.servers, vec!["legacy.internal/api".to_string()]);
    }

    #[test]
    fn test_unparseable_spec_keeps_path_only() {
        // Marker present (so it classified) but the YAML is broken.
        let content = "openapi: 3.0.0\ninfo: [title: {broken\n";
        let api = extract(&PathBuf::from("bad.yaml"), content);
        assert_eq!(api.file_path, PathBuf::from("bad.yaml"));
        assert!(api.title.is_none());
        assert!(api.servers.is_empty());
    }

    #[test]
    fn test_blank_title_is_dropped() {
        let content = "openapi: 3.0.0\ninfo:\n  title: \"  \"\n";
        let api = extract(&PathBuf::from("a.yaml"), content);
        assert!(api.title.is_none());
    }
}
