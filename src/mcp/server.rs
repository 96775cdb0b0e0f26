//! MCP JSON-RPC 2.0 server — reads requests from stdin, writes responses to stdout.
//!
//! The MCP protocol uses newline-delimited JSON over STDIO.
//! Tracing output goes to stderr so it doesn't interfere with the protocol.

use std::io::{self, BufRead, Write};
use std::sync::{Arc, RwLock};

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::tools;
use super::types::*;
use crate::catalog::ApiCatalog;
use crate::config::ScanConfig;

/// Run the MCP server loop, reading JSON-RPC from stdin and writing to stdout.
///
/// The catalog is shared; the detect tool inserts scan results into it.
pub fn run(catalog: Arc<RwLock<ApiCatalog>>, config: ScanConfig) {
    info!("MCP server starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                error!(error = %e, "failed to read stdin");
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        debug!(request = %trimmed, "received request");

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "invalid JSON-RPC request");
                let response = JsonRpcResponse::error(
                    None,
                    JsonRpcError::PARSE_ERROR,
                    format!("Parse error: {}", e),
                );
                write_response(&mut stdout, &response);
                continue;
            }
        };

        let response = handle_request(&catalog, &config, &request);

        if let Some(resp) = response {
            write_response(&mut stdout, &resp);
        }
    }

    info!("MCP server shutting down");
}

/// Handle a single JSON-RPC request and return a response (or None for notifications).
fn handle_request(
    catalog: &Arc<RwLock<ApiCatalog>>,
    config: &ScanConfig,
    request: &JsonRpcRequest,
) -> Option<JsonRpcResponse> {
    let id = request.id.clone();

    match request.method.as_str() {
        "initialize" => {
            info!("client initializing");
            let result = InitializeResult {
                protocol_version: "2024-11-05".to_string(),
                capabilities: ServerCapabilities {
                    tools: ToolCapability {},
                },
                server_info: ServerInfo {
                    name: "apiscan".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            };
            Some(JsonRpcResponse::success(
                id,
                serde_json::to_value(result).unwrap_or_default(),
            ))
        }

        "notifications/initialized" => {
            info!("client initialized");
            None // Notifications don't get responses
        }

        "tools/list" => {
            debug!("listing tools");
            let result = ToolsListResult {
                tools: tools::list_tools(),
            };
            Some(JsonRpcResponse::success(
                id,
                serde_json::to_value(result).unwrap_or_default(),
            ))
        }

        "tools/call" => {
            let params: ToolsCallParams = match serde_json::from_value(request.params.clone()) {
                Ok(p) => p,
                Err(e) => {
                    return Some(JsonRpcResponse::error(
                        id,
                        JsonRpcError::INVALID_PARAMS,
                        format!("Invalid params: {}", e),
                    ));
                }
            };

            debug!(tool = %params.name, "calling tool");

            let result = tools::call_tool(catalog, config, &params.name, &params.arguments);
            Some(JsonRpcResponse::success(
                id,
                serde_json::to_value(result).unwrap_or_default(),
            ))
        }

        "ping" => Some(JsonRpcResponse::success(
            id,
            Value::Object(Default::default()),
        )),

        _ => {
            warn!(method = %request.method, "unknown method");
            Some(JsonRpcResponse::error(
                id,
                JsonRpcError::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ))
        }
    }
}

/// Write a JSON-RPC response to stdout (newline-delimited).
fn write_response(stdout: &mut impl Write, response: &JsonRpcResponse) {
    let json = serde_json::to_string(response).unwrap_or_default();
    debug!(response = %json, "sending response");
    let _ = writeln!(stdout, "{}", json);
    let _ = stdout.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(method: &str, params: Value) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: Some(json!(1)),
            method: method.to_string(),
            params,
        }
    }

    #[test]
    fn test_initialize_handshake() {
        let catalog = Arc::new(RwLock::new(ApiCatalog::new()));
        let config = ScanConfig::default();

        let response =
            handle_request(&catalog, &config, &request("initialize", json!({}))).unwrap();
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "apiscan");
    }

    #[test]
    fn test_initialized_notification_has_no_response() {
        let catalog = Arc::new(RwLock::new(ApiCatalog::new()));
        let config = ScanConfig::default();

        let response = handle_request(
            &catalog,
            &config,
            &request("notifications/initialized", json!({})),
        );
        assert!(response.is_none());
    }

    #[test]
    fn test_tools_list() {
        let catalog = Arc::new(RwLock::new(ApiCatalog::new()));
        let config = ScanConfig::default();

        let response =
            handle_request(&catalog, &config, &request("tools/list", json!({}))).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["tools"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_unknown_method() {
        let catalog = Arc::new(RwLock::new(ApiCatalog::new()));
        let config = ScanConfig::default();

        let response =
            handle_request(&catalog, &config, &request("bogus/method", json!({}))).unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn test_tools_call_invalid_params() {
        let catalog = Arc::new(RwLock::new(ApiCatalog::new()));
        let config = ScanConfig::default();

        // params missing the required `name` field
        let response =
            handle_request(&catalog, &config, &request("tools/call", json!({}))).unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
    }
}
