//! Single-supertype resolution
//!
//! The metamodel lets a type declare several supertypes; generated classes
//! can only extend one. Resolution picks that one deterministically:
//!
//! 1. an entry in the override table wins unconditionally;
//! 2. no declared supertypes resolves to the root type;
//! 3. a single declared supertype is used as-is;
//! 4. several declared supertypes resolve to the first one, with a warning.

use crate::cache::TypeDefCache;
use crate::config::ResolutionConfig;
use atlan_core::types::TypeDefinition;
use indexmap::IndexMap;
use tracing::warn;

/// Universal base of every generated model object
pub const DEFAULT_ROOT_TYPE: &str = "Reference";

/// Authored overrides shipped with the generator.
///
/// Each entry either settles a multiple-inheritance declaration or collapses
/// an intermediate level the generated model does not keep.
const DEFAULT_OVERRIDES: &[(&str, &str)] = &[
    ("DbtColumnProcess", "Dbt"),
    ("DbtProcess", "Dbt"),
    ("DbtTag", "Dbt"),
    ("SnowflakeTag", "Tag"),
    ("SnowflakeDynamicTable", "Table"),
    ("DynamoDBTable", "Table"),
    ("DynamoDBGlobalSecondaryIndex", "DynamoDBSecondaryIndex"),
    ("DynamoDBLocalSecondaryIndex", "DynamoDBSecondaryIndex"),
    ("CosmosMongoDBCollection", "MongoDBCollection"),
    ("CosmosMongoDBDatabase", "MongoDBDatabase"),
    ("MCIncident", "MonteCarlo"),
    ("BIProcess", "Process"),
    ("ColumnProcess", "Process"),
];

/// Authored `type -> supertype` mapping consulted before the declared supertypes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    entries: IndexMap<String, String>,
}

impl OverrideTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding the built-in overrides
    #[must_use]
    pub fn atlan_defaults() -> Self {
        DEFAULT_OVERRIDES.iter().copied().collect()
    }

    /// Add or replace an override
    pub fn insert(&mut self, type_name: impl Into<String>, supertype: impl Into<String>) {
        self.entries.insert(type_name.into(), supertype.into());
    }

    /// Override for `type_name`, if any
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&str> {
        self.entries.get(type_name).map(String::as_str)
    }

    /// Number of overrides
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Overrides in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (type_name, supertype) in iter {
            table.insert(type_name, supertype);
        }
        table
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for OverrideTable {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (type_name, supertype) in iter {
            self.insert(type_name, supertype);
        }
    }
}

/// Outcome of resolving one type, naming the rule that applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Taken from the override table
    Override(String),
    /// No declared supertypes: the root type
    Root(String),
    /// Exactly one declared supertype
    Single(String),
    /// Several declared supertypes and no override; the first was chosen
    Ambiguous {
        /// The supertype used
        chosen: String,
        /// Every declared supertype, in declaration order
        candidates: Vec<String>,
    },
}

impl Resolution {
    /// The single supertype to extend
    #[must_use]
    pub fn supertype(&self) -> &str {
        match self {
            Self::Override(s) | Self::Root(s) | Self::Single(s) => s,
            Self::Ambiguous { chosen, .. } => chosen,
        }
    }

    /// Whether the first-declared fallback was used
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Self::Ambiguous { .. })
    }

    /// Short name of the rule that produced this resolution
    #[must_use]
    pub fn rule(&self) -> &'static str {
        match self {
            Self::Override(_) => "override",
            Self::Root(_) => "root",
            Self::Single(_) => "single",
            Self::Ambiguous { .. } => "ambiguous",
        }
    }
}

/// Picks one supertype per type for single-inheritance generation
#[derive(Debug, Clone)]
pub struct SupertypeResolver {
    root_type: String,
    overrides: OverrideTable,
}

impl Default for SupertypeResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_TYPE, OverrideTable::atlan_defaults())
    }
}

impl SupertypeResolver {
    /// Create a resolver with an explicit root type and override table
    #[must_use]
    pub fn new(root_type: impl Into<String>, overrides: OverrideTable) -> Self {
        Self {
            root_type: root_type.into(),
            overrides,
        }
    }

    /// Create a resolver from the `resolution` configuration section
    #[must_use]
    pub fn from_config(config: &ResolutionConfig) -> Self {
        let mut overrides = if config.use_default_overrides {
            OverrideTable::atlan_defaults()
        } else {
            OverrideTable::new()
        };
        overrides.extend(config.overrides.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        Self::new(config.root_type.clone(), overrides)
    }

    /// Name of the universal base type
    #[must_use]
    pub fn root_type(&self) -> &str {
        &self.root_type
    }

    /// The override table in use
    #[must_use]
    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Whether `type_name` is the root type
    #[must_use]
    pub fn is_root(&self, type_name: &str) -> bool {
        type_name == self.root_type
    }

    /// Resolve without emitting diagnostics
    #[must_use]
    pub fn resolve(&self, type_name: &str, natural_super_types: &[String]) -> Resolution {
        if let Some(supertype) = self.overrides.get(type_name) {
            return Resolution::Override(supertype.to_string());
        }
        match natural_super_types {
            [] => Resolution::Root(self.root_type.clone()),
            [only] => Resolution::Single(only.clone()),
            [first, ..] => Resolution::Ambiguous {
                chosen: first.clone(),
                candidates: natural_super_types.to_vec(),
            },
        }
    }

    /// Resolve a definition without emitting diagnostics
    #[must_use]
    pub fn resolve_def(&self, def: &TypeDefinition) -> Resolution {
        self.resolve(&def.name, &def.super_types)
    }

    /// The single supertype `type_name` should extend
    ///
    /// Falling back to the first of several declared supertypes logs a warning.
    #[must_use]
    pub fn resolve_single_supertype(&self, type_name: &str, natural_super_types: &[String]) -> String {
        let resolution = self.resolve(type_name, natural_super_types);
        if let Resolution::Ambiguous { chosen, candidates } = &resolution {
            warn!(
                type_name,
                chosen = %chosen,
                candidates = ?candidates,
                "multiple supertypes without an override, using the first declared"
            );
        }
        resolution.supertype().to_string()
    }
}

/// A type resolved through the first-declared fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ambiguity {
    /// Type that declared several supertypes
    pub type_name: String,
    /// Supertype that was chosen
    pub chosen: String,
    /// Every declared supertype
    pub candidates: Vec<String>,
}

/// Every cached type that resolves through the first-declared fallback
#[must_use]
pub fn ambiguities(cache: &TypeDefCache, resolver: &SupertypeResolver) -> Vec<Ambiguity> {
    cache
        .iter()
        .filter_map(|def| match resolver.resolve_def(def) {
            Resolution::Ambiguous { chosen, candidates } => Some(Ambiguity {
                type_name: def.name.clone(),
                chosen,
                candidates,
            }),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_rules_in_order() {
        let resolver = SupertypeResolver::new("Reference", [("Special", "Elsewhere")].into_iter().collect());

        assert_eq!(
            resolver.resolve("Special", &names(&["A", "B"])),
            Resolution::Override("Elsewhere".to_string())
        );
        assert_eq!(
            resolver.resolve("Asset", &[]),
            Resolution::Root("Reference".to_string())
        );
        assert_eq!(
            resolver.resolve("Table", &names(&["SQL"])),
            Resolution::Single("SQL".to_string())
        );
        let ambiguous = resolver.resolve("Mixed", &names(&["B", "A"]));
        assert!(ambiguous.is_ambiguous());
        assert_eq!(ambiguous.supertype(), "B");
        assert_eq!(ambiguous.rule(), "ambiguous");
    }

    #[test]
    fn test_config_overrides_win_over_defaults() {
        let mut config = ResolutionConfig::default();
        config
            .overrides
            .insert("DbtProcess".to_string(), "Process".to_string());

        let resolver = SupertypeResolver::from_config(&config);
        assert_eq!(resolver.resolve_single_supertype("DbtProcess", &[]), "Process");
        assert_eq!(resolver.resolve_single_supertype("DbtColumnProcess", &[]), "Dbt");

        config.use_default_overrides = false;
        let resolver = SupertypeResolver::from_config(&config);
        assert_eq!(
            resolver.resolve_single_supertype("DbtColumnProcess", &names(&["ColumnProcess", "Dbt"])),
            "ColumnProcess"
        );
    }

    #[test]
    fn test_default_table_has_no_self_references() {
        for (type_name, supertype) in OverrideTable::atlan_defaults().iter() {
            assert_ne!(type_name, supertype);
        }
    }
}
