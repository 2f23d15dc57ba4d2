//! Tests for loading and sharing the type definition cache

use async_trait::async_trait;
use atlan_core::prelude::*;
use atlan_typegen::cache::{InMemorySource, JsonFileSource, TypeDefCache, TypeDefSource};
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::NamedTempFile;

/// Source that counts how often it is fetched
struct CountingSource {
    fetches: Arc<AtomicUsize>,
    defs: Vec<TypeDefinition>,
}

#[async_trait]
impl TypeDefSource for CountingSource {
    fn describe(&self) -> String {
        "counting".to_string()
    }

    async fn fetch(&self) -> Result<Vec<TypeDefinition>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.defs.clone())
    }
}

fn sample_defs() -> Vec<TypeDefinition> {
    vec![
        TypeDefinition::entity("Asset").with_relationship("meanings", "array<AtlasGlossaryTerm>"),
        TypeDefinition::entity("Table")
            .with_super_types(["Asset"])
            .with_relationship("columns", "array<Column>"),
        TypeDefinition::structure("AwsTag").with_attribute("awsTagKey", "string"),
    ]
}

#[tokio::test]
async fn test_load_is_idempotent() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        fetches: Arc::clone(&fetches),
        defs: sample_defs(),
    };

    let mut cache = TypeDefCache::new();
    cache.load(&source).await.expect("first load should succeed");
    cache.load(&source).await.expect("second load should be a no-op");

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 3);
}

#[tokio::test]
async fn test_empty_source_is_an_error() {
    let mut cache = TypeDefCache::new();
    let err = cache
        .load(&InMemorySource::default())
        .await
        .expect_err("empty source must fail");

    assert!(matches!(err, AtlanError::SourceError { .. }));
    assert!(cache.is_empty());
}

#[tokio::test]
async fn test_failed_load_leaves_cache_empty_and_retry_works() {
    let mut cache = TypeDefCache::new();
    let missing = JsonFileSource::new("/nonexistent/typedefs.json");
    assert!(cache.load(&missing).await.is_err());
    assert!(cache.is_empty());

    cache
        .load(&sample_defs().into_iter().collect::<InMemorySource>())
        .await
        .expect("retry with a good source should succeed");
    assert!(cache.contains("Table"));
}

#[tokio::test]
async fn test_file_source_reads_typedef_response() {
    let response = serde_json::json!({
        "enumDefs": [{
            "name": "certificate_status",
            "elementDefs": [{"value": "DRAFT", "ordinal": 0}, {"value": "VERIFIED", "ordinal": 1}]
        }],
        "structDefs": [{
            "name": "AwsTag",
            "attributeDefs": [{"name": "awsTagKey", "typeName": "string"}]
        }],
        "entityDefs": [
            {"name": "Asset", "superTypes": ["Referenceable"]},
            {
                "name": "Table",
                "superTypes": ["SQL"],
                "relationshipAttributeDefs": [
                    {"name": "columns", "typeName": "array<Column>", "cardinality": "SET"}
                ]
            }
        ],
        "relationshipDefs": [{"name": "table_columns"}]
    });
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{response}").expect("write typedefs");

    let mut cache = TypeDefCache::new();
    cache
        .load(&JsonFileSource::new(file.path()))
        .await
        .expect("file should load");

    assert_eq!(cache.len(), 4);
    assert_eq!(
        cache.get("certificate_status").map(|d| d.category),
        Some(TypeCategory::Enum)
    );
    assert_eq!(cache.get("AwsTag").map(|d| d.category), Some(TypeCategory::Struct));
    let table = cache.get("Table").expect("Table cached");
    assert_eq!(table.category, TypeCategory::Entity);
    assert_eq!(table.relationship("columns").map(|r| r.target_type()), Some("Column"));
    assert!(!cache.contains("table_columns"));
}

#[tokio::test]
async fn test_malformed_file_is_a_source_error() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{{ not json").expect("write");

    let err = TypeDefCache::new()
        .load(&JsonFileSource::new(file.path()))
        .await
        .expect_err("malformed file must fail");
    match err {
        AtlanError::SourceError { location, .. } => {
            assert_eq!(location.as_deref(), Some(file.path().display().to_string().as_str()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_shared_snapshot_is_readable_from_many_tasks() {
    let shared = TypeDefCache::from_defs(sample_defs()).into_shared();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&shared);
            tokio::spawn(async move { cache.get("Table").map(|def| def.super_types.clone()) })
        })
        .collect();

    for handle in handles {
        let supers = handle.await.expect("task should not panic");
        assert_eq!(supers, Some(vec!["Asset".to_string()]));
    }
}
