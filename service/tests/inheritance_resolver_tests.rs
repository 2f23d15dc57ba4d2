//! Tests for single-supertype resolution

use atlan_core::prelude::*;
use atlan_typegen::cache::TypeDefCache;
use atlan_typegen::config::ResolutionConfig;
use atlan_typegen::inheritance::{
    DEFAULT_ROOT_TYPE, OverrideTable, Resolution, SupertypeResolver, ambiguities,
};
use proptest::prelude::*;

fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn test_no_supertypes_resolves_to_root() {
    let resolver = SupertypeResolver::default();
    assert_eq!(resolver.root_type(), DEFAULT_ROOT_TYPE);
    assert_eq!(resolver.resolve_single_supertype("Asset", &[]), "Reference");
    assert!(resolver.is_root("Reference"));
}

#[test]
fn test_single_supertype_is_kept() {
    let resolver = SupertypeResolver::default();
    assert_eq!(resolver.resolve_single_supertype("Table", &names(&["SQL"])), "SQL");
}

#[test]
fn test_built_in_overrides() {
    let resolver = SupertypeResolver::default();
    assert_eq!(
        resolver.resolve_single_supertype("DbtProcess", &names(&["Process", "Dbt"])),
        "Dbt"
    );
    assert_eq!(
        resolver.resolve_single_supertype("SnowflakeDynamicTable", &names(&["SnowflakeView"])),
        "Table"
    );
    assert_eq!(
        resolver.resolve("DynamoDBLocalSecondaryIndex", &names(&["Table", "DynamoDB"])),
        Resolution::Override("DynamoDBSecondaryIndex".to_string())
    );
    // Override applies even when nothing is declared
    assert_eq!(resolver.resolve_single_supertype("MCIncident", &[]), "MonteCarlo");
}

#[test]
fn test_ambiguous_picks_first_declared() {
    let resolver = SupertypeResolver::new("Reference", OverrideTable::new());
    let resolution = resolver.resolve("SnowflakePipe", &names(&["SQL", "Snowflake"]));
    assert_eq!(
        resolution,
        Resolution::Ambiguous {
            chosen: "SQL".to_string(),
            candidates: names(&["SQL", "Snowflake"]),
        }
    );
}

#[test]
fn test_custom_root_from_config() {
    let config: ResolutionConfig =
        serde_yaml::from_str("root_type: Referenceable\nuse_default_overrides: false\n")
            .expect("config should parse");
    let resolver = SupertypeResolver::from_config(&config);
    assert_eq!(resolver.resolve_single_supertype("Asset", &[]), "Referenceable");
    assert!(resolver.overrides().is_empty());
}

#[test]
fn test_ambiguities_report() {
    let cache = TypeDefCache::from_defs([
        TypeDefinition::entity("Asset"),
        TypeDefinition::entity("SnowflakePipe").with_super_types(["SQL", "Snowflake"]),
        TypeDefinition::entity("DbtProcess").with_super_types(["Process", "Dbt"]),
    ]);

    let report = ambiguities(&cache, &SupertypeResolver::default());
    assert_eq!(report.len(), 1);
    assert_eq!(report[0].type_name, "SnowflakePipe");
    assert_eq!(report[0].chosen, "SQL");
}

fn type_name() -> impl Strategy<Value = String> {
    "[A-Z][a-zA-Z]{0,8}"
}

proptest! {
    #[test]
    fn prop_resolution_is_deterministic(
        name in type_name(),
        supers in prop::collection::vec(type_name(), 0..4),
    ) {
        let resolver = SupertypeResolver::default();
        let first = resolver.resolve_single_supertype(&name, &supers);
        let second = resolver.resolve_single_supertype(&name, &supers);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_override_always_wins(
        name in type_name(),
        target in type_name(),
        supers in prop::collection::vec(type_name(), 0..4),
    ) {
        let mut table = OverrideTable::new();
        table.insert(name.clone(), target.clone());
        let resolver = SupertypeResolver::new("Reference", table);
        prop_assert_eq!(resolver.resolve_single_supertype(&name, &supers), target);
    }

    #[test]
    fn prop_without_override_result_is_declared_or_root(
        name in type_name(),
        supers in prop::collection::vec(type_name(), 0..4),
    ) {
        let resolver = SupertypeResolver::new("Reference", OverrideTable::new());
        let chosen = resolver.resolve_single_supertype(&name, &supers);
        match supers.first() {
            Some(first) => prop_assert_eq!(&chosen, first),
            None => prop_assert_eq!(chosen.as_str(), "Reference"),
        }
    }
}
