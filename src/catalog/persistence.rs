//! Catalog snapshot persistence.
//!
//! The catalog is serialized with bincode into the `.apiscan`
//! directory so query commands don't re-scan on every invocation.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::engine::ApiCatalog;
use crate::error::{ApiScanError, Result};

impl ApiCatalog {
    /// Write the catalog snapshot, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ApiScanError::io(parent, e))?;
        }
        let bytes = bincode::serialize(self)
            .map_err(|e| ApiScanError::Snapshot(format!("encode failed: {}", e)))?;
        fs::write(path, bytes).map_err(|e| ApiScanError::io(path, e))?;
        debug!(snapshot = %path.display(), repositories = self.len(), "catalog saved");
        Ok(())
    }

    /// Read a catalog snapshot.
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| ApiScanError::io(path, e))?;
        let catalog: ApiCatalog = bincode::deserialize(&bytes)
            .map_err(|e| ApiScanError::Snapshot(format!("decode failed: {}", e)))?;
        debug!(snapshot = %path.display(), repositories = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::types::{RepositoryApiDetection, RestApiInfo};
    use chrono::Utc;
    use std::path::PathBuf;

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".apiscan").join("catalog.bin");

        let mut catalog = ApiCatalog::new();
        catalog.insert(RepositoryApiDetection {
            repository: "petstore".to_string(),
            rest_apis: vec![RestApiInfo {
                file_path: PathBuf::from("openapi.yaml"),
                title: Some("Pets".to_string()),
                version: Some("1.0".to_string()),
                description: None,
                servers: vec!["https://pets.internal".to_string()],
            }],
            graphql_apis: vec![],
            grpc_apis: vec![],
            has_any_apis: true,
            buttons: crate::detect::recommend_buttons(1, 0, 0),
            detected_at: Utc::now(),
        });

        catalog.save(&path).unwrap();
        let loaded = ApiCatalog::load(&path).unwrap();

        assert_eq!(loaded.len(), 1);
        let entry = loaded.get("petstore").unwrap();
        assert_eq!(entry.rest_apis[0].title.as_deref(), Some("Pets"));
        assert!(entry.has_any_apis);
    }

    #[test]
    fn test_load_missing_snapshot() {
        let result = ApiCatalog::load(Path::new("/nonexistent/catalog.bin"));
        assert!(matches!(result, Err(ApiScanError::Io { .. })));
    }

    #[test]
    fn test_load_corrupt_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.bin");
        std::fs::write(&path, b"not a snapshot").unwrap();

        let result = ApiCatalog::load(&path);
        assert!(matches!(result, Err(ApiScanError::Snapshot(_))));
    }
}
