//! File classification by extension and content markers.

use std::path::Path;

use super::grpc;
use super::types::ApiKind;

/// Check whether a path has an extension worth reading at all.
///
/// The walker uses this to avoid reading files that can never classify,
/// no matter their content.
pub fn is_candidate(path: &Path) -> bool {
    matches!(
        extension(path),
        Some("yaml" | "yml" | "json" | "graphql" | "gql" | "proto")
    )
}

/// Classify a file into an API kind, or `None` if it is not an API file.
///
/// Extension narrows the bucket; content markers confirm it:
/// - `.yaml`/`.yml`/`.json` must carry an `openapi`/`swagger` marker;
/// - `.graphql`/`.gql` always classify;
/// - `.proto` must declare at least one `service` block.
pub fn classify(path: &Path, content: &str) -> Option<ApiKind> {
    match extension(path)? {
        "yaml" | "yml" => has_yaml_marker(content).then_some(ApiKind::Rest),
        "json" => has_json_marker(content).then_some(ApiKind::Rest),
        "graphql" | "gql" => Some(ApiKind::Graphql),
        "proto" => grpc::has_service(content).then_some(ApiKind::Grpc),
        _ => None,
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension()?.to_str()
}

/// An `openapi:`/`swagger:` key at the start of a line.
fn has_yaml_marker(content: &str) -> bool {
    content
        .lines()
        .any(|line| line.starts_with("openapi:") || line.starts_with("swagger:"))
}

/// An `"openapi"`/`"swagger"` key anywhere in the document.
///
/// Text scan rather than a parse, so truncated or slightly broken
/// exports still classify.
fn has_json_marker(content: &str) -> bool {
    content.contains("\"openapi\"") || content.contains("\"swagger\"")
}
