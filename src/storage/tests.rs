//! Storage Module Tests
//!
//! Validates adapter semantics that hold without external services.
//!
//! ## Test Scopes
//! - **Normalization**: lowercasing is the single identity rule for city names.
//! - **MemoryStore**: full upsert/lookup contract.
//! - **RelationalStore**: unusable-until-connected behavior.
//! - **DocumentStore**: URL, mapping and document construction.
//!
//! *Note: operations against live MySQL/Elasticsearch instances are covered
//! by integration environments, not unit tests.*

#[cfg(test)]
mod tests {
    use crate::config::{DocumentConfig, RelationalConfig};
    use crate::storage::document::{CityDocument, DocumentStore};
    use crate::storage::error::StoreError;
    use crate::storage::memory::MemoryStore;
    use crate::storage::relational::RelationalStore;
    use crate::storage::{CityStore, normalize_name};

    fn relational_config() -> RelationalConfig {
        RelationalConfig {
            host: "localhost".to_string(),
            port: 3306,
            username: "root".to_string(),
            password: "password".to_string(),
            database: "citydb".to_string(),
            max_connections: 5,
        }
    }

    fn document_config() -> DocumentConfig {
        DocumentConfig {
            host: "localhost".to_string(),
            port: 9200,
            username: None,
            password: None,
            index_name: "cities".to_string(),
        }
    }

    // ============================================================
    // NORMALIZATION
    // ============================================================

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize_name("Paris"), "paris");
        assert_eq!(normalize_name("PARIS"), "paris");
        assert_eq!(normalize_name("paris"), "paris");
    }

    #[test]
    fn test_normalize_handles_non_ascii() {
        assert_eq!(normalize_name("São Paulo"), "são paulo");
        assert_eq!(normalize_name("MÜNCHEN"), "münchen");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_name("New York");
        assert_eq!(normalize_name(&once), once);
    }

    // ============================================================
    // MEMORY STORE
    // ============================================================

    #[tokio::test]
    async fn test_memory_upsert_then_lookup() {
        let store = MemoryStore::new();

        store.upsert_city("Paris", 2_148_000).await.unwrap();

        assert_eq!(store.get_city_population("paris").await, Some(2_148_000));
    }

    #[tokio::test]
    async fn test_memory_lookup_is_case_insensitive() {
        let store = MemoryStore::new();

        store.upsert_city("Paris", 2_148_000).await.unwrap();

        for name in ["Paris", "paris", "PARIS", "pArIs"] {
            assert_eq!(
                store.get_city_population(name).await,
                Some(2_148_000),
                "Lookup of {} should hit the same record",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_memory_upsert_overwrites_single_record() {
        let store = MemoryStore::new();

        store.upsert_city("Paris", 1_000).await.unwrap();
        store.upsert_city("PARIS", 2_000).await.unwrap();
        store.upsert_city("paris", 3_000).await.unwrap();

        assert_eq!(store.city_count(), 1, "Repeated upserts must not duplicate");
        assert_eq!(store.get_city_population("paris").await, Some(3_000));
    }

    #[tokio::test]
    async fn test_memory_lookup_of_unknown_city_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get_city_population("atlantis").await, None);
    }

    #[tokio::test]
    async fn test_memory_connect_is_idempotent() {
        let store = MemoryStore::new();
        assert!(store.connect().await.is_ok());
        assert!(store.connect().await.is_ok());
    }

    // ============================================================
    // RELATIONAL STORE (not connected)
    // ============================================================

    #[tokio::test]
    async fn test_relational_upsert_fails_fast_without_connection() {
        let store = RelationalStore::new(relational_config());

        let result = store.upsert_city("paris", 2_148_000).await;

        assert!(matches!(result, Err(StoreError::NotConnected)));
    }

    #[tokio::test]
    async fn test_relational_lookup_without_connection_is_none() {
        let store = RelationalStore::new(relational_config());
        assert_eq!(store.get_city_population("paris").await, None);
    }

    // ============================================================
    // DOCUMENT STORE (request construction)
    // ============================================================

    #[test]
    fn test_document_urls() {
        let store = DocumentStore::new(document_config());

        assert_eq!(store.index_url(), "http://localhost:9200/cities");
        assert_eq!(
            store.document_url("paris"),
            "http://localhost:9200/cities/_doc/paris"
        );
    }

    #[test]
    fn test_document_store_unauthenticated_without_full_credentials() {
        let store = DocumentStore::new(document_config());
        assert!(!store.authenticated());

        // Username alone is not enough.
        let store = DocumentStore::new(DocumentConfig {
            username: Some("elastic".to_string()),
            ..document_config()
        });
        assert!(!store.authenticated());

        let store = DocumentStore::new(DocumentConfig {
            username: Some("elastic".to_string()),
            password: Some("changeme".to_string()),
            ..document_config()
        });
        assert!(store.authenticated());
    }

    #[test]
    fn test_document_serializes_expected_fields() {
        let document = CityDocument {
            name: "paris".to_string(),
            population: 2_148_000,
        };

        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "name": "paris", "population": 2_148_000 })
        );
    }

    #[test]
    fn test_index_mapping_types() {
        let mapping = DocumentStore::index_mapping();

        assert_eq!(
            mapping["mappings"]["properties"]["name"]["type"],
            "keyword"
        );
        assert_eq!(
            mapping["mappings"]["properties"]["population"]["type"],
            "long"
        );
    }
}
