//! Relationship de-duplication over the flattened hierarchy
//!
//! Relationship attributes are repeated on every subtype in the typedefs.
//! Generated classes and docs must list each one only at the level that
//! introduces it, so for every type this pass keeps the relationship names
//! not already visible through its resolved ancestor chain.
//!
//! The pass is a worklist fixpoint: a type is processed once its resolved
//! supertype is already processed, or is a root with no definition of its
//! own. A root present in the typedefs is processed first and passes its
//! relationships down like any other type. A pass that makes no
//! progress means the remaining types hang off a cycle or an unknown type,
//! and the whole computation fails with the stuck names.

use super::resolver::SupertypeResolver;
use crate::cache::TypeDefCache;
use atlan_core::prelude::*;
use indexmap::IndexMap;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Relationship names introduced at each type, with the resolved hierarchy
#[derive(Debug, Clone, Default)]
pub struct RelationshipIndex {
    root_type: String,
    /// Whether the root has its own definition in the cache
    root_in_graph: bool,
    /// Names new at each type, in resolution order
    introduced: IndexMap<String, BTreeSet<String>>,
    /// Names visible at each type (inherited and introduced)
    visible: HashMap<String, BTreeSet<String>>,
    /// Resolved single supertype of each type
    supertypes: HashMap<String, String>,
    passes: usize,
}

impl RelationshipIndex {
    /// Run the de-duplication pass over every cached type
    ///
    /// `max_passes` caps the number of passes; `0` allows one pass per type
    /// plus one, which always suffices for a well-formed graph.
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::UnresolvedTypes` listing every type that could not
    /// be processed because its supertype chain never reaches the root.
    pub fn compute(
        cache: &TypeDefCache,
        resolver: &SupertypeResolver,
        max_passes: usize,
    ) -> Result<Self> {
        let max_passes = if max_passes == 0 {
            cache.len() + 1
        } else {
            max_passes
        };

        let mut index = Self {
            root_type: resolver.root_type().to_string(),
            root_in_graph: cache.contains(resolver.root_type()),
            ..Self::default()
        };
        let mut pending: Vec<(&TypeDefinition, String)> = cache
            .iter()
            .map(|def| {
                let supertype = resolver.resolve_single_supertype(&def.name, &def.super_types);
                (def, supertype)
            })
            .collect();

        while !pending.is_empty() {
            if index.passes == max_passes {
                return Err(AtlanError::unresolved(
                    pending.iter().map(|(def, _)| def.name.as_str()),
                ));
            }
            index.passes += 1;

            let before = pending.len();
            pending.retain(|(def, supertype)| !index.try_add(def, supertype));
            debug!(
                pass = index.passes,
                resolved = before - pending.len(),
                remaining = pending.len(),
                "relationship de-duplication pass"
            );

            if pending.len() == before {
                return Err(AtlanError::unresolved(
                    pending.iter().map(|(def, _)| def.name.as_str()),
                ));
            }
        }

        info!(
            types = index.len(),
            passes = index.passes,
            "relationship de-duplication complete"
        );
        Ok(index)
    }

    /// Record `def` if its supertype is available; returns whether it was recorded
    fn try_add(&mut self, def: &TypeDefinition, supertype: &str) -> bool {
        // Children of a root with its own definition wait for it
        let inherited = if def.name == self.root_type {
            BTreeSet::new()
        } else if let Some(visible) = self.visible.get(supertype) {
            visible.clone()
        } else if supertype == self.root_type && !self.root_in_graph {
            BTreeSet::new()
        } else {
            return false;
        };

        let own: BTreeSet<String> = def.relationship_names().map(str::to_string).collect();
        let introduced: BTreeSet<String> = own.difference(&inherited).cloned().collect();
        debug!(
            type_name = %def.name,
            supertype,
            introduced = introduced.len(),
            inherited = inherited.len(),
            "resolved type"
        );
        let mut visible = inherited;
        visible.extend(own);

        self.introduced.insert(def.name.clone(), introduced);
        self.visible.insert(def.name.clone(), visible);
        // The root itself may appear in the typedefs; it has no parent.
        if def.name != self.root_type {
            self.supertypes
                .insert(def.name.clone(), supertype.to_string());
        }
        true
    }

    /// Relationship names introduced at `type_name`
    #[must_use]
    pub fn new_relationships(&self, type_name: &str) -> Option<&BTreeSet<String>> {
        self.introduced.get(type_name)
    }

    /// Every relationship name visible at `type_name`
    #[must_use]
    pub fn all_relationships(&self, type_name: &str) -> Option<&BTreeSet<String>> {
        self.visible.get(type_name)
    }

    /// Relationship names `type_name` inherits from its ancestor chain
    #[must_use]
    pub fn inherited_relationships(&self, type_name: &str) -> Option<BTreeSet<String>> {
        let supertype = self.supertypes.get(type_name)?;
        Some(self.visible.get(supertype).cloned().unwrap_or_default())
    }

    /// Resolved single supertype of `type_name`
    #[must_use]
    pub fn supertype_of(&self, type_name: &str) -> Option<&str> {
        self.supertypes.get(type_name).map(String::as_str)
    }

    /// Supertypes from the direct parent up to and including the root
    #[must_use]
    pub fn ancestor_chain(&self, type_name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut current = type_name;
        while let Some(parent) = self.supertypes.get(current) {
            chain.push(parent.clone());
            current = parent.as_str();
        }
        chain
    }

    /// Type (`type_name` itself or an ancestor) that introduces `relationship`
    #[must_use]
    pub fn introduced_by(&self, type_name: &str, relationship: &str) -> Option<&str> {
        let mut current = type_name;
        loop {
            let (name, introduced) = self.introduced.get_key_value(current)?;
            if introduced.contains(relationship) {
                return Some(name.as_str());
            }
            current = self.supertypes.get(current)?.as_str();
        }
    }

    /// Processed type names in resolution order (every type after its supertype)
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.introduced.keys().map(String::as_str)
    }

    /// Introduced names for every type, in resolution order
    #[must_use]
    pub fn as_map(&self) -> &IndexMap<String, BTreeSet<String>> {
        &self.introduced
    }

    /// Whether `type_name` was processed
    #[must_use]
    pub fn contains(&self, type_name: &str) -> bool {
        self.introduced.contains_key(type_name)
    }

    /// Number of processed types
    #[must_use]
    pub fn len(&self) -> usize {
        self.introduced.len()
    }

    /// Whether no types were processed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.introduced.is_empty()
    }

    /// Number of passes the computation took
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Root type the hierarchy was resolved against
    #[must_use]
    pub fn root_type(&self) -> &str {
        &self.root_type
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inheritance::resolver::OverrideTable;

    fn resolver() -> SupertypeResolver {
        SupertypeResolver::new("Reference", OverrideTable::new())
    }

    #[test]
    fn test_children_listed_before_parents_take_extra_passes() {
        let cache = TypeDefCache::from_defs([
            TypeDefinition::entity("SnowflakeTable")
                .with_super_types(["Table"])
                .with_relationship("snowflakeStreams", "array<SnowflakeStream>")
                .with_relationship("columns", "array<Column>"),
            TypeDefinition::entity("Table")
                .with_super_types(["Asset"])
                .with_relationship("columns", "array<Column>"),
            TypeDefinition::entity("Asset").with_relationship("meanings", "array<AtlasGlossaryTerm>"),
        ]);

        let index = RelationshipIndex::compute(&cache, &resolver(), 0).unwrap();
        assert_eq!(index.passes(), 3);
        assert_eq!(
            index.type_names().collect::<Vec<_>>(),
            vec!["Asset", "Table", "SnowflakeTable"]
        );
        assert_eq!(
            index.new_relationships("SnowflakeTable").unwrap(),
            &BTreeSet::from(["snowflakeStreams".to_string()])
        );
        assert_eq!(
            index.ancestor_chain("SnowflakeTable"),
            vec!["Table", "Asset", "Reference"]
        );
        assert_eq!(index.introduced_by("SnowflakeTable", "columns"), Some("Table"));
        assert_eq!(index.introduced_by("SnowflakeTable", "meanings"), Some("Asset"));
        assert_eq!(index.introduced_by("SnowflakeTable", "nothing"), None);
    }

    #[test]
    fn test_pass_cap_is_enforced() {
        let cache = TypeDefCache::from_defs([
            TypeDefinition::entity("C").with_super_types(["B"]),
            TypeDefinition::entity("B").with_super_types(["A"]),
            TypeDefinition::entity("A"),
        ]);

        let err = RelationshipIndex::compute(&cache, &resolver(), 2).unwrap_err();
        match err {
            AtlanError::UnresolvedTypes { types } => assert_eq!(types, vec!["C".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
    }
}
