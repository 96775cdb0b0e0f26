//! The repository catalog — detection results indexed by repository name.
//!
//! Holds one `RepositoryApiDetection` per repository and provides
//! lookup, cross-repository search, and aggregate statistics.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

use crate::detect::types::{ApiKind, ButtonKind, RepositoryApiDetection};
use crate::error::ApiScanError;

/// All known repositories and their latest detection results.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ApiCatalog {
    repositories: HashMap<String, RepositoryApiDetection>,
}

impl ApiCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Entry Operations ───────────────────────────────────────

    /// Insert a detection result. A re-scan of a known repository
    /// replaces the previous entry.
    pub fn insert(&mut self, detection: RepositoryApiDetection) {
        if self.repositories.contains_key(&detection.repository) {
            debug!(repository = %detection.repository, "replacing catalog entry");
        }
        self.repositories
            .insert(detection.repository.clone(), detection);
    }

    /// Remove a repository's entry, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<RepositoryApiDetection> {
        self.repositories.remove(name)
    }

    /// Look up a repository by name.
    pub fn get(&self, name: &str) -> Option<&RepositoryApiDetection> {
        self.repositories.get(name)
    }

    /// Look up a repository that must exist, erroring when it doesn't.
    pub fn get_required(&self, name: &str) -> crate::Result<&RepositoryApiDetection> {
        self.repositories
            .get(name)
            .ok_or_else(|| ApiScanError::RepositoryNotFound(name.to_string()))
    }

    /// Repository names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.repositories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// All entries, sorted by repository name.
    pub fn entries(&self) -> Vec<&RepositoryApiDetection> {
        let mut entries: Vec<&RepositoryApiDetection> = self.repositories.values().collect();
        entries.sort_by(|a, b| a.repository.cmp(&b.repository));
        entries
    }

    pub fn len(&self) -> usize {
        self.repositories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repositories.is_empty()
    }

    // ─── Search ─────────────────────────────────────────────────

    /// Search across repositories.
    ///
    /// A repository-name match returns every API in that repository;
    /// otherwise individual APIs match on file path, REST title, gRPC
    /// service name, or gRPC package.
    pub fn search(&self, query: &str) -> CatalogSearchResult {
        let query_lower = query.to_lowercase();
        let mut result = CatalogSearchResult::default();

        if query_lower.is_empty() {
            result.match_type = "none".to_string();
            return result;
        }

        // 1. Repository-name matches.
        for detection in self.entries() {
            if detection.repository.to_lowercase().contains(&query_lower) {
                result.matched_repositories.push(detection.repository.clone());
                push_all_apis(&mut result.matches, detection);
            }
        }

        if !result.matched_repositories.is_empty() {
            result.match_type = "repository".to_string();
            return result;
        }

        // 2. Per-API matches.
        for detection in self.entries() {
            for api in &detection.rest_apis {
                let title_hit = api
                    .title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&query_lower));
                if title_hit || path_matches(&api.file_path, &query_lower) {
                    result.matches.push(CatalogMatch {
                        repository: detection.repository.clone(),
                        kind: ApiKind::Rest,
                        file_path: api.file_path.clone(),
                        label: api.title.clone(),
                    });
                }
            }
            for api in &detection.graphql_apis {
                if path_matches(&api.file_path, &query_lower) {
                    result.matches.push(CatalogMatch {
                        repository: detection.repository.clone(),
                        kind: ApiKind::Graphql,
                        file_path: api.file_path.clone(),
                        label: Some(api.kind.to_string()),
                    });
                }
            }
            for api in &detection.grpc_apis {
                let service_hit = api
                    .services
                    .iter()
                    .any(|s| s.to_lowercase().contains(&query_lower));
                let package_hit = api
                    .package
                    .as_deref()
                    .is_some_and(|p| p.to_lowercase().contains(&query_lower));
                if service_hit || package_hit || path_matches(&api.file_path, &query_lower) {
                    result.matches.push(CatalogMatch {
                        repository: detection.repository.clone(),
                        kind: ApiKind::Grpc,
                        file_path: api.file_path.clone(),
                        label: Some(api.services.join(", ")),
                    });
                }
            }
        }

        result.match_type = if result.matches.is_empty() {
            "none".to_string()
        } else {
            "api".to_string()
        };
        result
    }

    // ─── Stats ──────────────────────────────────────────────────

    /// Aggregate statistics over the whole catalog.
    pub fn stats(&self) -> CatalogStats {
        let mut stats = CatalogStats {
            repository_count: self.repositories.len(),
            ..CatalogStats::default()
        };

        for detection in self.repositories.values() {
            if detection.has_any_apis {
                stats.repositories_with_apis += 1;
            }
            stats.rest_apis += detection.rest_apis.len();
            stats.graphql_apis += detection.graphql_apis.len();
            stats.grpc_apis += detection.grpc_apis.len();
            for button in &detection.buttons {
                match button {
                    ButtonKind::Swagger => stats.buttons.swagger += 1,
                    ButtonKind::Graphql => stats.buttons.graphql += 1,
                    ButtonKind::Grpc => stats.buttons.grpc += 1,
                    ButtonKind::Postman => stats.buttons.postman += 1,
                }
            }
        }

        stats
    }
}

fn path_matches(path: &std::path::Path, query_lower: &str) -> bool {
    path.to_string_lossy().to_lowercase().contains(query_lower)
}

fn push_all_apis(matches: &mut Vec<CatalogMatch>, detection: &RepositoryApiDetection) {
    for api in &detection.rest_apis {
        matches.push(CatalogMatch {
            repository: detection.repository.clone(),
            kind: ApiKind::Rest,
            file_path: api.file_path.clone(),
            label: api.title.clone(),
        });
    }
    for api in &detection.graphql_apis {
        matches.push(CatalogMatch {
            repository: detection.repository.clone(),
            kind: ApiKind::Graphql,
            file_path: api.file_path.clone(),
            label: Some(api.kind.to_string()),
        });
    }
    for api in &detection.grpc_apis {
        matches.push(CatalogMatch {
            repository: detection.repository.clone(),
            kind: ApiKind::Grpc,
            file_path: api.file_path.clone(),
            label: Some(api.services.join(", ")),
        });
    }
}

// ─── Search and Stats Result Types ──────────────────────────────

/// Result of a catalog search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSearchResult {
    /// How the query matched: "repository", "api", or "none".
    pub match_type: String,
    /// Repositories that matched by name.
    pub matched_repositories: Vec<String>,
    /// Matching APIs.
    pub matches: Vec<CatalogMatch>,
}

/// One matching API in a search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogMatch {
    pub repository: String,
    pub kind: ApiKind,
    pub file_path: PathBuf,
    /// Human label: REST title, GraphQL operation kind, or gRPC services.
    pub label: Option<String>,
}

/// Aggregate catalog statistics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogStats {
    pub repository_count: usize,
    pub repositories_with_apis: usize,
    pub rest_apis: usize,
    pub graphql_apis: usize,
    pub grpc_apis: usize,
    pub buttons: ButtonStats,
}

/// How often each button was recommended across the catalog.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ButtonStats {
    pub swagger: usize,
    pub graphql: usize,
    pub grpc: usize,
    pub postman: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::types::{GraphqlKind, GrpcApiInfo, RestApiInfo};
    use chrono::Utc;

    fn detection(name: &str, rest_title: Option<&str>) -> RepositoryApiDetection {
        let rest_apis = match rest_title {
            Some(title) => vec![RestApiInfo {
                file_path: PathBuf::from("api/openapi.yaml"),
                title: Some(title.to_string()),
                version: None,
                description: None,
                servers: vec![],
            }],
            None => vec![],
        };
        let has_any = !rest_apis.is_empty();
        let buttons = crate::detect::recommend_buttons(rest_apis.len(), 0, 0);
        RepositoryApiDetection {
            repository: name.to_string(),
            rest_apis,
            graphql_apis: vec![],
            grpc_apis: vec![],
            has_any_apis: has_any,
            buttons,
            detected_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = ApiCatalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.stats().repository_count, 0);
        assert_eq!(catalog.search("anything").match_type, "none");
    }

    #[test]
    fn test_insert_replaces_on_rescan() {
        let mut catalog = ApiCatalog::new();
        catalog.insert(detection("payments", Some("Payments v1")));
        catalog.insert(detection("payments", Some("Payments v2")));

        assert_eq!(catalog.len(), 1);
        let entry = catalog.get("payments").unwrap();
        assert_eq!(entry.rest_apis[0].title.as_deref(), Some("Payments v2"));
    }

    #[test]
    fn test_get_required_reports_missing_repository() {
        let mut catalog = ApiCatalog::new();
        catalog.insert(detection("payments", None));

        assert!(catalog.get_required("payments").is_ok());
        let err = catalog.get_required("billing").unwrap_err();
        assert!(matches!(err, ApiScanError::RepositoryNotFound(ref name) if name == "billing"));
    }

    #[test]
    fn test_remove() {
        let mut catalog = ApiCatalog::new();
        catalog.insert(detection("payments", None));
        assert!(catalog.remove("payments").is_some());
        assert!(catalog.remove("payments").is_none());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_names_sorted() {
        let mut catalog = ApiCatalog::new();
        catalog.insert(detection("zeta", None));
        catalog.insert(detection("alpha", None));
        catalog.insert(detection("mid", None));
        assert_eq!(catalog.names(), vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_search_by_repository_name() {
        let mut catalog = ApiCatalog::new();
        catalog.insert(detection("payments-service", Some("Payments")));
        catalog.insert(detection("users-service", Some("Users")));

        let result = catalog.search("payments");
        assert_eq!(result.match_type, "repository");
        assert_eq!(result.matched_repositories, vec!["payments-service"]);
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].kind, ApiKind::Rest);
    }

    #[test]
    fn test_search_by_rest_title() {
        let mut catalog = ApiCatalog::new();
        catalog.insert(detection("svc-a", Some("Billing API")));
        catalog.insert(detection("svc-b", Some("Users API")));

        let result = catalog.search("billing");
        assert_eq!(result.match_type, "api");
        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].repository, "svc-a");
        assert_eq!(result.matches[0].label.as_deref(), Some("Billing API"));
    }

    #[test]
    fn test_search_by_grpc_service_name() {
        let mut catalog = ApiCatalog::new();
        let mut d = detection("rpc-svc", None);
        d.grpc_apis.push(GrpcApiInfo {
            file_path: PathBuf::from("proto/users.proto"),
            services: vec!["UserDirectory".to_string()],
            package: Some("portal.users".to_string()),
            description: None,
        });
        d.has_any_apis = true;
        catalog.insert(d);

        let result = catalog.search("userdirectory");
        assert_eq!(result.match_type, "api");
        assert_eq!(result.matches[0].kind, ApiKind::Grpc);

        let result = catalog.search("portal.users");
        assert_eq!(result.matches.len(), 1);
    }

    #[test]
    fn test_search_no_hit() {
        let mut catalog = ApiCatalog::new();
        catalog.insert(detection("svc", Some("Billing")));
        let result = catalog.search("does-not-exist");
        assert_eq!(result.match_type, "none");
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_stats_counts() {
        let mut catalog = ApiCatalog::new();
        catalog.insert(detection("with-api", Some("A")));
        catalog.insert(detection("without-api", None));

        let mut d = detection("graphql-svc", None);
        d.graphql_apis.push(crate::detect::types::GraphqlApiInfo {
            file_path: PathBuf::from("schema.graphql"),
            kind: GraphqlKind::Schema,
            description: None,
        });
        d.has_any_apis = true;
        d.buttons = crate::detect::recommend_buttons(0, 1, 0);
        catalog.insert(d);

        let stats = catalog.stats();
        assert_eq!(stats.repository_count, 3);
        assert_eq!(stats.repositories_with_apis, 2);
        assert_eq!(stats.rest_apis, 1);
        assert_eq!(stats.graphql_apis, 1);
        assert_eq!(stats.grpc_apis, 0);
        assert_eq!(stats.buttons.swagger, 1);
        assert_eq!(stats.buttons.graphql, 1);
        assert_eq!(stats.buttons.postman, 2);
    }
}
