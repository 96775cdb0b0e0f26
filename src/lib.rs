//! # apiscan
//!
//! API surface detection for repositories.
//!
//! apiscan walks a repository's file tree, classifies files into
//! REST/OpenAPI, GraphQL, and gRPC specifications by extension and
//! content markers, extracts lightweight metadata from each, and derives
//! the set of explorer affordances ("buttons") a portal should offer for
//! that repository. Results are kept in a persistent catalog spanning
//! many repositories, and any repository with detected APIs can be
//! exported as a Postman collection.
//!
//! ## Key Features
//!
//! - **Content sniffing**: `.yaml`/`.json` files classify as REST only
//!   with an `openapi`/`swagger` marker; `.proto` only with a `service`
//! - **Error containment**: an unreadable or unparseable file is
//!   skipped, never fatal to a scan
//! - **Catalog**: detection results for all repositories, searchable
//!   and persisted across runs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use apiscan::{detect_repository, ScanConfig};
//! use std::path::Path;
//!
//! let config = ScanConfig::default();
//! let detection = detect_repository(Path::new("repos/payments"), &config)?;
//!
//! for button in &detection.buttons {
//!     println!("offer: {}", button);
//! }
//! # Ok::<(), apiscan::ApiScanError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod detect;
pub mod error;
pub mod mcp;
pub mod postman;

// Re-exports for convenience
pub use error::{ApiScanError, Result};

pub use config::ScanConfig;
pub use detect::{
    detect_repository, detect_workspace, recommend_buttons, ApiKind, ButtonKind,
    DetectionSummary, GraphqlApiInfo, GraphqlKind, GrpcApiInfo, RepositoryApiDetection,
    RestApiInfo,
};

pub use catalog::{ApiCatalog, CatalogMatch, CatalogSearchResult, CatalogStats};

pub use postman::build_collection;
