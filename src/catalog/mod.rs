//! Repository catalog module.
//!
//! Keeps detection results for many repositories, with search,
//! statistics, and snapshot persistence.

pub mod engine;
pub mod persistence;

pub use engine::{ApiCatalog, ButtonStats, CatalogMatch, CatalogSearchResult, CatalogStats};
