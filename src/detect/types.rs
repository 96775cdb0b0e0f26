//! Core types for API detection.
//!
//! Defines the API kinds, the per-file metadata structs, and the
//! per-repository detection result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The kind of API surface a file describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiKind {
    /// A REST/OpenAPI document (YAML or JSON with an `openapi`/`swagger` marker).
    Rest,
    /// A GraphQL schema or operation file (`.graphql`/`.gql`).
    Graphql,
    /// A Protocol Buffers file declaring at least one RPC service (`.proto`).
    Grpc,
}

impl fmt::Display for ApiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiKind::Rest => write!(f, "rest"),
            ApiKind::Graphql => write!(f, "graphql"),
            ApiKind::Grpc => write!(f, "grpc"),
        }
    }
}

/// An explorer affordance recommended for a repository.
///
/// Present only when the corresponding API kind was detected; `Postman`
/// is offered whenever any API exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonKind {
    Swagger,
    Graphql,
    Grpc,
    Postman,
}

impl fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonKind::Swagger => write!(f, "swagger"),
            ButtonKind::Graphql => write!(f, "graphql"),
            ButtonKind::Grpc => write!(f, "grpc"),
            ButtonKind::Postman => write!(f, "postman"),
        }
    }
}

/// What a GraphQL file contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphqlKind {
    /// Type/schema definitions.
    Schema,
    /// A named or anonymous query operation.
    Query,
    /// A mutation operation.
    Mutation,
    /// A subscription operation.
    Subscription,
    /// Anything else (fragments, snippets, sample documents).
    Example,
}

impl fmt::Display for GraphqlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphqlKind::Schema => write!(f, "schema"),
            GraphqlKind::Query => write!(f, "query"),
            GraphqlKind::Mutation => write!(f, "mutation"),
            GraphqlKind::Subscription => write!(f, "subscription"),
            GraphqlKind::Example => write!(f, "example"),
        }
    }
}

/// Metadata scraped from a REST/OpenAPI document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestApiInfo {
    /// Path relative to the repository root.
    pub file_path: PathBuf,
    /// `info.title`, when the document parses.
    pub title: Option<String>,
    /// `info.version`.
    pub version: Option<String>,
    /// `info.description`.
    pub description: Option<String>,
    /// `servers[].url` entries.
    #[serde(default)]
    pub servers: Vec<String>,
}

/// Metadata scraped from a GraphQL file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphqlApiInfo {
    /// Path relative to the repository root.
    pub file_path: PathBuf,
    /// What the file contains.
    pub kind: GraphqlKind,
    /// Leading `#` comment block, when present.
    pub description: Option<String>,
}

/// Metadata scraped from a Protocol Buffers service file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrpcApiInfo {
    /// Path relative to the repository root.
    pub file_path: PathBuf,
    /// Declared `service` names. Never empty — a `.proto` without a
    /// service is not classified as a gRPC API.
    pub services: Vec<String>,
    /// The `package` declaration, when present.
    pub package: Option<String>,
    /// Leading `//` comment block, when present.
    pub description: Option<String>,
}

/// Per-kind counts for a detection result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionSummary {
    pub rest: usize,
    pub graphql: usize,
    pub grpc: usize,
}

impl fmt::Display for DetectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rest: {}, graphql: {}, grpc: {}",
            self.rest, self.graphql, self.grpc
        )
    }
}

/// The full detection result for one repository.
///
/// Built fresh on each scan; the counts reported by [`summary`] are
/// always the lengths of the corresponding lists.
///
/// [`summary`]: RepositoryApiDetection::summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryApiDetection {
    /// Repository name (the scanned directory's name).
    pub repository: String,
    /// Detected REST/OpenAPI documents.
    pub rest_apis: Vec<RestApiInfo>,
    /// Detected GraphQL files.
    pub graphql_apis: Vec<GraphqlApiInfo>,
    /// Detected gRPC service files.
    pub grpc_apis: Vec<GrpcApiInfo>,
    /// True iff any list above is non-empty.
    pub has_any_apis: bool,
    /// Recommended explorer affordances, in fixed order.
    pub buttons: Vec<ButtonKind>,
    /// When the scan ran.
    pub detected_at: DateTime<Utc>,
}

impl RepositoryApiDetection {
    /// Per-kind counts, derived from the list lengths.
    pub fn summary(&self) -> DetectionSummary {
        DetectionSummary {
            rest: self.rest_apis.len(),
            graphql: self.graphql_apis.len(),
            grpc: self.grpc_apis.len(),
        }
    }

    /// Total number of detected API files.
    pub fn api_count(&self) -> usize {
        self.rest_apis.len() + self.graphql_apis.len() + self.grpc_apis.len()
    }
}
