//! MCP tool implementations — maps tool calls to scans and catalog queries.

use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::{json, Value};

use super::types::{ToolDefinition, ToolsCallResult};
use crate::catalog::ApiCatalog;
use crate::config::ScanConfig;
use crate::detect::detect_repository;

/// Return the list of all available tools with their JSON schemas.
pub fn list_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "apiscan_detect".to_string(),
            description: "Scan a repository directory for API surfaces. Classifies \
                REST/OpenAPI, GraphQL, and gRPC definition files, extracts their \
                metadata, and returns the recommended explorer buttons. The result \
                is also stored in the catalog."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "path": {
                        "type": "string",
                        "description": "Repository directory to scan (e.g., '/srv/repos/payments')"
                    }
                },
                "required": ["path"]
            }),
        },
        ToolDefinition {
            name: "apiscan_repository".to_string(),
            description: "Fetch the catalogued detection result for a repository: \
                its REST/GraphQL/gRPC API files, metadata, and recommended buttons."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "name": {
                        "type": "string",
                        "description": "Repository name as listed in the catalog"
                    }
                },
                "required": ["name"]
            }),
        },
        ToolDefinition {
            name: "apiscan_search".to_string(),
            description: "Search the catalog across repositories. Matches repository \
                names, spec file paths, REST API titles, and gRPC service/package names."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search query (e.g., 'billing', 'users.proto')"
                    }
                },
                "required": ["query"]
            }),
        },
        ToolDefinition {
            name: "apiscan_stats".to_string(),
            description: "Get catalog statistics: repository counts, per-kind API \
                counts, and how often each explorer button is recommended."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        },
    ]
}

/// Dispatch a tool call to the appropriate handler.
pub fn call_tool(
    catalog: &RwLock<ApiCatalog>,
    config: &ScanConfig,
    name: &str,
    arguments: &Value,
) -> ToolsCallResult {
    match name {
        "apiscan_detect" => handle_detect(catalog, config, arguments),
        "apiscan_repository" => handle_repository(catalog, arguments),
        "apiscan_search" => handle_search(catalog, arguments),
        "apiscan_stats" => handle_stats(catalog),
        _ => ToolsCallResult::error(format!("Unknown tool: {}", name)),
    }
}

fn handle_detect(
    catalog: &RwLock<ApiCatalog>,
    config: &ScanConfig,
    args: &Value,
) -> ToolsCallResult {
    let path = match args.get("path").and_then(|v| v.as_str()) {
        Some(p) => PathBuf::from(p),
        None => return ToolsCallResult::error("Missing required parameter: path".to_string()),
    };

    let detection = match detect_repository(&path, config) {
        Ok(d) => d,
        Err(e) => return ToolsCallResult::error(format!("Scan failed: {}", e)),
    };

    let json = serde_json::to_string_pretty(&detection).unwrap_or_default();

    match catalog.write() {
        Ok(mut guard) => guard.insert(detection),
        Err(e) => return ToolsCallResult::error(format!("Catalog lock error: {}", e)),
    }

    ToolsCallResult::text(json)
}

fn handle_repository(catalog: &RwLock<ApiCatalog>, args: &Value) -> ToolsCallResult {
    let name = match args.get("name").and_then(|v| v.as_str()) {
        Some(n) => n,
        None => return ToolsCallResult::error("Missing required parameter: name".to_string()),
    };

    let guard = match catalog.read() {
        Ok(g) => g,
        Err(e) => return ToolsCallResult::error(format!("Catalog lock error: {}", e)),
    };

    match guard.get_required(name) {
        Ok(detection) => {
            let json = serde_json::to_string_pretty(detection).unwrap_or_default();
            ToolsCallResult::text(json)
        }
        Err(e) => ToolsCallResult::error(e.to_string()),
    }
}

fn handle_search(catalog: &RwLock<ApiCatalog>, args: &Value) -> ToolsCallResult {
    let query = match args.get("query").and_then(|v| v.as_str()) {
        Some(q) => q,
        None => return ToolsCallResult::error("Missing required parameter: query".to_string()),
    };

    let guard = match catalog.read() {
        Ok(g) => g,
        Err(e) => return ToolsCallResult::error(format!("Catalog lock error: {}", e)),
    };

    let result = guard.search(query);
    let json = serde_json::to_string_pretty(&result).unwrap_or_default();
    ToolsCallResult::text(json)
}

fn handle_stats(catalog: &RwLock<ApiCatalog>) -> ToolsCallResult {
    let guard = match catalog.read() {
        Ok(g) => g,
        Err(e) => return ToolsCallResult::error(format!("Catalog lock error: {}", e)),
    };

    let stats = guard.stats();
    let json = serde_json::to_string_pretty(&stats).unwrap_or_default();
    ToolsCallResult::text(json)
}
