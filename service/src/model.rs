//! Resolved model snapshot shared by every generator

use crate::cache::TypeDefCache;
use crate::inheritance::{RelationshipIndex, Resolution, SupertypeResolver};
use atlan_core::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;

/// Frozen cache plus the hierarchy computed from it
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    cache: Arc<TypeDefCache>,
    resolver: SupertypeResolver,
    relationships: RelationshipIndex,
}

/// Differences between the compiled struct registry and the loaded struct typedefs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryDrift {
    /// Struct typedefs with no registered variant
    pub missing_from_registry: Vec<String>,
    /// Registered variants with no struct typedef
    pub not_in_source: Vec<String>,
}

impl RegistryDrift {
    /// Whether registry and typedefs agree
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing_from_registry.is_empty() && self.not_in_source.is_empty()
    }
}

impl ResolvedModel {
    /// Resolve the hierarchy of `cache`
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::UnresolvedTypes` if the de-duplication pass cannot
    /// place every type under the root.
    pub fn build(
        cache: Arc<TypeDefCache>,
        resolver: SupertypeResolver,
        max_passes: usize,
    ) -> Result<Self> {
        let relationships = RelationshipIndex::compute(&cache, &resolver, max_passes)?;
        info!(
            types = relationships.len(),
            root = resolver.root_type(),
            "resolved type model"
        );
        Ok(Self {
            cache,
            resolver,
            relationships,
        })
    }

    /// The frozen type definitions
    #[must_use]
    pub fn cache(&self) -> &TypeDefCache {
        &self.cache
    }

    /// Shared handle to the frozen type definitions
    #[must_use]
    pub fn shared_cache(&self) -> Arc<TypeDefCache> {
        Arc::clone(&self.cache)
    }

    /// The resolver the model was built with
    #[must_use]
    pub fn resolver(&self) -> &SupertypeResolver {
        &self.resolver
    }

    /// Relationship names per level
    #[must_use]
    pub fn relationships(&self) -> &RelationshipIndex {
        &self.relationships
    }

    /// Name of the universal base type
    #[must_use]
    pub fn root_type(&self) -> &str {
        self.resolver.root_type()
    }

    /// Resolved single supertype of `type_name`
    #[must_use]
    pub fn supertype_of(&self, type_name: &str) -> Option<&str> {
        self.relationships.supertype_of(type_name)
    }

    /// How `type_name` was resolved, if it is cached
    #[must_use]
    pub fn resolution_of(&self, type_name: &str) -> Option<Resolution> {
        self.cache
            .get(type_name)
            .map(|def| self.resolver.resolve_def(def))
    }

    /// Types whose resolved supertype is `type_name`, sorted
    #[must_use]
    pub fn resolved_subtypes(&self, type_name: &str) -> Vec<&str> {
        let mut children: Vec<&str> = self
            .relationships
            .type_names()
            .filter(|name| self.relationships.supertype_of(name) == Some(type_name))
            .collect();
        children.sort_unstable();
        children
    }

    /// Compare the compiled struct registry with the loaded struct typedefs
    #[must_use]
    pub fn struct_registry_drift(&self) -> RegistryDrift {
        let registered: BTreeSet<&str> = AtlanStruct::TYPE_NAMES.iter().copied().collect();
        let loaded: BTreeSet<&str> = self.cache.struct_defs().map(|def| def.name.as_str()).collect();

        RegistryDrift {
            missing_from_registry: loaded
                .difference(&registered)
                .map(ToString::to_string)
                .collect(),
            not_in_source: registered
                .difference(&loaded)
                .map(ToString::to_string)
                .collect(),
        }
    }
}
