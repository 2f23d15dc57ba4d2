//! Tests for relationship de-duplication over the resolved hierarchy

use atlan_core::prelude::*;
use atlan_typegen::cache::TypeDefCache;
use atlan_typegen::inheritance::{OverrideTable, RelationshipIndex, SupertypeResolver};
use atlan_typegen::model::ResolvedModel;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn plain_resolver() -> SupertypeResolver {
    SupertypeResolver::new("Reference", OverrideTable::new())
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(ToString::to_string).collect()
}

#[test]
fn test_table_only_lists_new_relationships() {
    let cache = TypeDefCache::from_defs([
        TypeDefinition::entity("Asset").with_relationship("linkedTerms", "array<AtlasGlossaryTerm>"),
        TypeDefinition::entity("Table")
            .with_super_types(["Asset"])
            .with_relationship("linkedTerms", "array<AtlasGlossaryTerm>")
            .with_relationship("columns", "array<Column>"),
    ]);

    let index = RelationshipIndex::compute(&cache, &plain_resolver(), 0).expect("should resolve");

    assert_eq!(index.new_relationships("Asset"), Some(&set(&["linkedTerms"])));
    assert_eq!(index.new_relationships("Table"), Some(&set(&["columns"])));
    assert_eq!(
        index.all_relationships("Table"),
        Some(&set(&["linkedTerms", "columns"]))
    );
    assert_eq!(index.inherited_relationships("Table"), Some(set(&["linkedTerms"])));
}

#[test]
fn test_root_in_typedefs_passes_its_relationships_down() {
    // Child listed first so it has to wait for the root
    let cache = TypeDefCache::from_defs([
        TypeDefinition::entity("Asset")
            .with_super_types(["Referenceable"])
            .with_relationship("meanings", "array<AtlasGlossaryTerm>")
            .with_relationship("links", "array<Link>"),
        TypeDefinition::entity("Referenceable")
            .with_relationship("meanings", "array<AtlasGlossaryTerm>"),
    ]);
    let resolver = SupertypeResolver::new("Referenceable", OverrideTable::new());

    let index = RelationshipIndex::compute(&cache, &resolver, 0).expect("should resolve");

    assert_eq!(index.new_relationships("Referenceable"), Some(&set(&["meanings"])));
    assert_eq!(index.supertype_of("Referenceable"), None);
    assert_eq!(index.new_relationships("Asset"), Some(&set(&["links"])));
    assert_eq!(index.inherited_relationships("Asset"), Some(set(&["meanings"])));
    assert_eq!(index.introduced_by("Asset", "meanings"), Some("Referenceable"));
    assert_eq!(index.ancestor_chain("Asset"), vec!["Referenceable".to_string()]);
}

#[test]
fn test_root_children_keep_everything() {
    let cache = TypeDefCache::from_defs([TypeDefinition::entity("Asset")
        .with_relationship("meanings", "array<AtlasGlossaryTerm>")]);

    let index = RelationshipIndex::compute(&cache, &plain_resolver(), 0).expect("should resolve");
    assert_eq!(index.new_relationships("Asset"), Some(&set(&["meanings"])));
    assert_eq!(index.supertype_of("Asset"), Some("Reference"));
    assert_eq!(index.ancestor_chain("Asset"), vec!["Reference".to_string()]);
}

#[test]
fn test_every_type_is_processed() {
    let cache = TypeDefCache::from_defs([
        TypeDefinition::entity("SnowflakeTable").with_super_types(["Table"]),
        TypeDefinition::entity("Table").with_super_types(["SQL"]),
        TypeDefinition::entity("SQL").with_super_types(["Catalog"]),
        TypeDefinition::entity("Catalog").with_super_types(["Asset"]),
        TypeDefinition::entity("Asset"),
        TypeDefinition::structure("AwsTag"),
    ]);

    let index = RelationshipIndex::compute(&cache, &plain_resolver(), 0).expect("should resolve");
    assert_eq!(index.len(), cache.len());
    for def in cache.iter() {
        assert!(index.contains(&def.name), "{} missing", def.name);
    }
    // Every type appears after its supertype
    let order: Vec<&str> = index.type_names().collect();
    for name in &order {
        if let Some(parent) = index.supertype_of(name)
            && parent != "Reference"
        {
            let parent_pos = order.iter().position(|n| *n == parent);
            let pos = order.iter().position(|n| n == name);
            assert!(parent_pos < pos, "{parent} should precede {name}");
        }
    }
}

#[test]
fn test_cycle_is_reported() {
    let cache = TypeDefCache::from_defs([
        TypeDefinition::entity("Asset"),
        TypeDefinition::entity("A").with_super_types(["B"]),
        TypeDefinition::entity("B").with_super_types(["A"]),
    ]);

    let err = RelationshipIndex::compute(&cache, &plain_resolver(), 0)
        .expect_err("cycle must not resolve");
    match err {
        AtlanError::UnresolvedTypes { types } => {
            assert_eq!(types, vec!["A".to_string(), "B".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_supertype_is_reported() {
    let cache = TypeDefCache::from_defs([
        TypeDefinition::entity("Asset"),
        TypeDefinition::entity("Orphan").with_super_types(["DoesNotExist"]),
        TypeDefinition::entity("OrphanChild").with_super_types(["Orphan"]),
    ]);

    let err = RelationshipIndex::compute(&cache, &plain_resolver(), 0)
        .expect_err("unknown supertype must not resolve");
    assert_eq!(err.to_string(), "Unresolved types: Orphan, OrphanChild");
}

#[test]
fn test_override_changes_what_is_new() {
    // Without the override, DbtProcess would resolve to Process and inherit `inputs`
    let cache = TypeDefCache::from_defs([
        TypeDefinition::entity("Process").with_relationship("inputs", "array<Catalog>"),
        TypeDefinition::entity("Dbt"),
        TypeDefinition::entity("DbtProcess")
            .with_super_types(["Process", "Dbt"])
            .with_relationship("inputs", "array<Catalog>"),
    ]);

    let plain = RelationshipIndex::compute(&cache, &plain_resolver(), 0).expect("should resolve");
    assert_eq!(plain.new_relationships("DbtProcess"), Some(&BTreeSet::new()));

    let overridden =
        RelationshipIndex::compute(&cache, &SupertypeResolver::default(), 0).expect("should resolve");
    assert_eq!(overridden.supertype_of("DbtProcess"), Some("Dbt"));
    assert_eq!(overridden.new_relationships("DbtProcess"), Some(&set(&["inputs"])));
}

#[test]
fn test_model_build_surfaces_unresolved_types() {
    let cache = TypeDefCache::from_defs([TypeDefinition::entity("Loop").with_super_types(["Loop"])]);
    let err = ResolvedModel::build(cache.into_shared(), plain_resolver(), 0)
        .expect_err("self-loop must not resolve");
    assert!(matches!(err, AtlanError::UnresolvedTypes { .. }));
}

/// Random forest of types: `(parent index, relationship names)`
fn forest() -> impl Strategy<Value = Vec<(Option<prop::sample::Index>, BTreeSet<usize>)>> {
    prop::collection::vec(
        (
            prop::option::of(any::<prop::sample::Index>()),
            prop::collection::btree_set(0..6usize, 0..4),
        ),
        1..12,
    )
}

/// Forest definitions, optionally with a `Reference` definition carrying `root_rels`
fn build_forest(
    spec: &[(Option<prop::sample::Index>, BTreeSet<usize>)],
    root_rels: Option<&BTreeSet<usize>>,
) -> Vec<TypeDefinition> {
    let mut defs: Vec<TypeDefinition> = spec
        .iter()
        .enumerate()
        .map(|(i, (parent, rels))| {
            let mut def = TypeDefinition::entity(format!("T{i}"));
            if i > 0
                && let Some(parent) = parent
            {
                def = def.with_super_types([format!("T{}", parent.index(i))]);
            }
            for rel in rels {
                def = def.with_relationship(format!("r{rel}"), "array<Asset>");
            }
            def
        })
        .collect();
    if let Some(rels) = root_rels {
        let mut root = TypeDefinition::entity("Reference");
        for rel in rels {
            root = root.with_relationship(format!("r{rel}"), "array<Asset>");
        }
        defs.push(root);
    }
    // Children first, so resolution needs several passes
    defs.reverse();
    defs
}

proptest! {
    #[test]
    fn prop_no_relationship_is_introduced_twice_on_a_chain(
        spec in forest(),
        root_rels in prop::option::of(prop::collection::btree_set(0..6usize, 0..4)),
    ) {
        let cache = TypeDefCache::from_defs(build_forest(&spec, root_rels.as_ref()));
        let index = RelationshipIndex::compute(&cache, &plain_resolver(), 0).expect("forest resolves");

        prop_assert_eq!(index.len(), cache.len());
        for def in cache.iter() {
            let introduced = index.new_relationships(&def.name).expect("processed");
            let inherited = index.inherited_relationships(&def.name).unwrap_or_default();
            prop_assert!(introduced.is_disjoint(&inherited));

            let own: BTreeSet<String> = def.relationship_names().map(str::to_string).collect();
            let visible: BTreeSet<String> = own.union(&inherited).cloned().collect();
            prop_assert_eq!(index.all_relationships(&def.name), Some(&visible));

            // Each visible name is introduced by exactly one type on the chain
            for name in &visible {
                let owners = std::iter::once(def.name.clone())
                    .chain(index.ancestor_chain(&def.name))
                    .filter(|t| index.new_relationships(t).is_some_and(|s| s.contains(name)))
                    .count();
                prop_assert_eq!(owners, 1);
            }
        }
    }
}
