//! API detection module — the core of apiscan.
//!
//! Provides the file walker, the extension/content classifier, the
//! per-kind metadata extractors, and the button recommender.

pub mod classifier;
pub mod graphql;
pub mod grpc;
pub mod rest;
pub mod scanner;
pub mod types;

pub use scanner::{detect_repository, detect_repository_named, detect_workspace, recommend_buttons};
pub use types::{
    ApiKind, ButtonKind, DetectionSummary, GraphqlApiInfo, GraphqlKind, GrpcApiInfo,
    RepositoryApiDetection, RestApiInfo,
};
