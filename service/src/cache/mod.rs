//! Fetch-once, read-many store of type definitions
//!
//! The cache is filled from a [`TypeDefSource`] exactly once and then frozen
//! into a shared snapshot with [`TypeDefCache::into_shared`]. Everything
//! downstream (resolution, relationship de-duplication, generation) reads
//! that snapshot and never mutates it.

pub mod source;

pub use source::{AtlanApiSource, InMemorySource, JsonFileSource, TypeDefSource};

use atlan_core::prelude::*;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// In-memory map from type name to definition
#[derive(Debug, Clone, Default)]
pub struct TypeDefCache {
    defs: IndexMap<String, TypeDefinition>,
}

impl TypeDefCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the cache from `source`
    ///
    /// A cache that already holds definitions is left untouched and the
    /// source is not consulted.
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::SourceError` if the source fails or yields no
    /// definitions; the cache stays empty in that case.
    pub async fn load(&mut self, source: &dyn TypeDefSource) -> Result<()> {
        if !self.is_empty() {
            debug!(
                types = self.len(),
                "type definition cache already populated, skipping load"
            );
            return Ok(());
        }

        let location = source.describe();
        let defs = source.fetch().await?;
        if defs.is_empty() {
            return Err(AtlanError::source_error_at(
                "no type definitions returned",
                location,
            ));
        }

        let mut loaded = IndexMap::with_capacity(defs.len());
        for def in defs {
            if let Some(previous) = loaded.insert(def.name.clone(), def) {
                warn!(type_name = %previous.name, "duplicate type definition, keeping the later one");
            }
        }
        derive_sub_types(&mut loaded);

        self.defs = loaded;
        info!(types = self.len(), source = %location, "loaded type definitions");
        Ok(())
    }

    /// Build a populated cache directly from definitions
    #[must_use]
    pub fn from_defs(defs: impl IntoIterator<Item = TypeDefinition>) -> Self {
        let mut loaded: IndexMap<String, TypeDefinition> = defs
            .into_iter()
            .map(|def| (def.name.clone(), def))
            .collect();
        derive_sub_types(&mut loaded);
        Self { defs: loaded }
    }

    /// Freeze the cache into a shared, read-only snapshot
    #[must_use]
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Look up a definition by type name
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&TypeDefinition> {
        self.defs.get(type_name)
    }

    /// Whether a definition exists for `type_name`
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.defs.contains_key(type_name)
    }

    /// Number of cached definitions
    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether the cache holds no definitions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// All definitions in load order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.defs.values()
    }

    /// Definitions of one category in load order
    pub fn by_category(&self, category: TypeCategory) -> impl Iterator<Item = &TypeDefinition> {
        self.defs.values().filter(move |def| def.category == category)
    }

    /// Entity definitions in load order
    pub fn entity_defs(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.by_category(TypeCategory::Entity)
    }

    /// Struct definitions in load order
    pub fn struct_defs(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.by_category(TypeCategory::Struct)
    }

    /// Enum definitions in load order
    pub fn enum_defs(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.by_category(TypeCategory::Enum)
    }
}

/// Rebuild every `sub_types` list from the declared `super_types`
fn derive_sub_types(defs: &mut IndexMap<String, TypeDefinition>) {
    let mut children: IndexMap<String, Vec<String>> = IndexMap::new();
    for def in defs.values() {
        for parent in &def.super_types {
            children
                .entry(parent.clone())
                .or_default()
                .push(def.name.clone());
        }
    }
    for def in defs.values_mut() {
        def.sub_types = children.shift_remove(&def.name).unwrap_or_default();
        def.sub_types.sort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_types_are_derived() {
        let mut stale = TypeDefinition::entity("Asset");
        stale.sub_types = vec!["Gone".to_string()];

        let cache = TypeDefCache::from_defs([
            stale,
            TypeDefinition::entity("Table").with_super_types(["SQL", "Asset"]),
            TypeDefinition::entity("SQL").with_super_types(["Asset"]),
        ]);

        let asset = cache.get("Asset").unwrap();
        assert_eq!(asset.sub_types, vec!["SQL".to_string(), "Table".to_string()]);
        assert_eq!(cache.get("SQL").unwrap().sub_types, vec!["Table".to_string()]);
        assert!(cache.get("Table").unwrap().sub_types.is_empty());
    }

    #[test]
    fn test_category_filters() {
        let cache = TypeDefCache::from_defs([
            TypeDefinition::entity("Table"),
            TypeDefinition::structure("AwsTag"),
            TypeDefinition::enumeration("certificate_status"),
        ]);
        assert_eq!(cache.entity_defs().count(), 1);
        assert_eq!(cache.struct_defs().next().unwrap().name, "AwsTag");
        assert_eq!(cache.enum_defs().count(), 1);
        assert!(cache.contains("Table"));
        assert!(!cache.contains("Column"));
    }
}
