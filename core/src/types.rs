//! Type definitions as served by the Atlan typedef API

use serde::{Deserialize, Serialize};

/// Category of a metadata type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCategory {
    /// Cataloged object (table, column, glossary term, ...)
    #[default]
    Entity,
    /// Embeddable value object without identity
    Struct,
    /// Enumeration of permitted values
    Enum,
    /// Relationship between two entity types
    Relationship,
    /// Classification (tag) type
    Classification,
    /// Custom metadata set
    BusinessMetadata,
}

/// Number of values an attribute can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cardinality {
    /// Exactly one value
    #[default]
    Single,
    /// Ordered collection
    List,
    /// Unordered collection of distinct values
    Set,
}

impl Cardinality {
    /// Whether the attribute holds more than one value
    #[must_use]
    pub fn is_multivalued(self) -> bool {
        !matches!(self, Self::Single)
    }
}

/// Plain (non-relationship) attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDef {
    /// Attribute name
    pub name: String,

    /// Atlan type expression, e.g. `string`, `array<string>`, `map<string,string>`
    pub type_name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Value cardinality
    #[serde(default)]
    pub cardinality: Cardinality,

    /// Whether the attribute may be omitted
    #[serde(default = "default_true")]
    pub is_optional: bool,
}

/// Relationship-valued attribute
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipAttributeDef {
    /// Attribute name
    pub name: String,

    /// Target type expression, e.g. `Column` or `array<Column>`
    pub type_name: String,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// SINGLE or SET
    #[serde(default)]
    pub cardinality: Cardinality,

    /// Name of the relationship typedef backing this attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_type_name: Option<String>,
}

impl RelationshipAttributeDef {
    /// Referenced entity type with any `array<...>` wrapper removed
    #[must_use]
    pub fn target_type(&self) -> &str {
        unwrap_container(&self.type_name)
    }
}

/// One permitted value of an enum typedef
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumElementDef {
    /// Value as stored
    pub value: String,

    /// Position in the enumeration
    #[serde(default)]
    pub ordinal: i32,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A single metadata type: entity, struct or enum
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefinition {
    /// Unique type name
    pub name: String,

    /// Type category
    #[serde(default)]
    pub category: TypeCategory,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning service (`atlas_core`, `snowflake`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,

    /// Declared parents, in declaration order
    #[serde(default)]
    pub super_types: Vec<String>,

    /// Direct children; derived, not authoritative
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_types: Vec<String>,

    /// Plain attributes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attribute_defs: Vec<AttributeDef>,

    /// Relationship-valued attributes
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relationship_attribute_defs: Vec<RelationshipAttributeDef>,

    /// Enum values (ENUM category only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub element_defs: Vec<EnumElementDef>,
}

impl TypeDefinition {
    /// Create an empty definition of the given category
    #[must_use]
    pub fn new(name: impl Into<String>, category: TypeCategory) -> Self {
        Self {
            name: name.into(),
            category,
            ..Default::default()
        }
    }

    /// Create an empty entity definition
    #[must_use]
    pub fn entity(name: impl Into<String>) -> Self {
        Self::new(name, TypeCategory::Entity)
    }

    /// Create an empty struct definition
    #[must_use]
    pub fn structure(name: impl Into<String>) -> Self {
        Self::new(name, TypeCategory::Struct)
    }

    /// Create an empty enum definition
    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, TypeCategory::Enum)
    }

    /// Set the description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the declared supertypes
    #[must_use]
    pub fn with_super_types<I, S>(mut self, super_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.super_types = super_types.into_iter().map(Into::into).collect();
        self
    }

    /// Add a plain attribute
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.attribute_defs.push(AttributeDef {
            name: name.into(),
            type_name: type_name.into(),
            is_optional: true,
            ..Default::default()
        });
        self
    }

    /// Add a relationship attribute; `array<...>` targets are recorded as SET
    #[must_use]
    pub fn with_relationship(
        mut self,
        name: impl Into<String>,
        type_name: impl Into<String>,
    ) -> Self {
        let type_name = type_name.into();
        let cardinality = if type_name.starts_with("array<") {
            Cardinality::Set
        } else {
            Cardinality::Single
        };
        self.relationship_attribute_defs.push(RelationshipAttributeDef {
            name: name.into(),
            type_name,
            cardinality,
            ..Default::default()
        });
        self
    }

    /// Add an enum value; ordinals follow insertion order
    #[must_use]
    pub fn with_element(mut self, value: impl Into<String>) -> Self {
        let ordinal = i32::try_from(self.element_defs.len()).unwrap_or(i32::MAX);
        self.element_defs.push(EnumElementDef {
            value: value.into(),
            ordinal,
            description: None,
        });
        self
    }

    /// Names of the relationship attributes declared on this type
    pub fn relationship_names(&self) -> impl Iterator<Item = &str> {
        self.relationship_attribute_defs
            .iter()
            .map(|r| r.name.as_str())
    }

    /// Look up a declared relationship attribute by name
    #[must_use]
    pub fn relationship(&self, name: &str) -> Option<&RelationshipAttributeDef> {
        self.relationship_attribute_defs
            .iter()
            .find(|r| r.name == name)
    }
}

/// Body of `GET /api/meta/types/typedefs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDefResponse {
    /// Enum definitions
    #[serde(default)]
    pub enum_defs: Vec<TypeDefinition>,

    /// Struct definitions
    #[serde(default)]
    pub struct_defs: Vec<TypeDefinition>,

    /// Entity definitions
    #[serde(default)]
    pub entity_defs: Vec<TypeDefinition>,

    /// Relationship definitions
    #[serde(default)]
    pub relationship_defs: Vec<TypeDefinition>,

    /// Classification definitions
    #[serde(default)]
    pub classification_defs: Vec<TypeDefinition>,

    /// Custom metadata definitions
    #[serde(default)]
    pub business_metadata_defs: Vec<TypeDefinition>,
}

impl TypeDefResponse {
    /// Entity, struct and enum definitions with their category stamped from the list they came in
    #[must_use]
    pub fn into_model_defs(self) -> Vec<TypeDefinition> {
        let stamp = |defs: Vec<TypeDefinition>, category: TypeCategory| {
            defs.into_iter().map(move |mut def| {
                def.category = category;
                def
            })
        };
        stamp(self.enum_defs, TypeCategory::Enum)
            .chain(stamp(self.struct_defs, TypeCategory::Struct))
            .chain(stamp(self.entity_defs, TypeCategory::Entity))
            .collect()
    }

    /// Whether the response carries no entity, struct or enum definitions
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enum_defs.is_empty() && self.struct_defs.is_empty() && self.entity_defs.is_empty()
    }
}

/// Strip one `array<...>` wrapper from an Atlan type expression
#[must_use]
pub fn unwrap_container(type_name: &str) -> &str {
    type_name
        .strip_prefix("array<")
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(type_name)
}

fn default_true() -> bool {
    true
}
