//! Base functionality shared by the generators

use crate::cache::TypeDefCache;
use atlan_core::prelude::*;
use convert_case::{Case, Casing};

/// Type names whose generated class drops the Atlas prefix
const CLASS_RENAMES: &[(&str, &str)] = &[
    ("AtlasGlossary", "Glossary"),
    ("AtlasGlossaryTerm", "GlossaryTerm"),
    ("AtlasGlossaryCategory", "GlossaryCategory"),
];

const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
];

/// Atlan type expression to Java type mapping
pub struct TypeMapper;

impl TypeMapper {
    /// Map a primitive Atlan type to its boxed Java type
    #[must_use]
    pub fn java_primitive(atlan_type: &str) -> Option<&'static str> {
        Some(match atlan_type {
            "string" => "String",
            "int" | "short" | "byte" => "Integer",
            "long" | "date" => "Long",
            "float" | "double" => "Double",
            "boolean" => "Boolean",
            _ => return None,
        })
    }

    /// Map a plain attribute's type expression to a Java type
    ///
    /// Struct and enum names resolve to their generated class; anything else
    /// that is not a primitive is assumed to be an entity reference.
    #[must_use]
    pub fn to_java(type_expr: &str, cardinality: Cardinality, cache: &TypeDefCache) -> String {
        let type_expr = type_expr.trim();
        if let Some(inner) = type_expr
            .strip_prefix("array<")
            .and_then(|rest| rest.strip_suffix('>'))
        {
            let element = Self::to_java(inner, Cardinality::Single, cache);
            return match cardinality {
                Cardinality::List => format!("List<{element}>"),
                _ => format!("SortedSet<{element}>"),
            };
        }
        if let Some(inner) = type_expr
            .strip_prefix("map<")
            .and_then(|rest| rest.strip_suffix('>'))
            && let Some((key, value)) = split_top_level(inner)
        {
            let key = Self::to_java(key, Cardinality::Single, cache);
            let value = Self::to_java(value, Cardinality::Single, cache);
            return format!("Map<{key}, {value}>");
        }
        if let Some(primitive) = Self::java_primitive(type_expr) {
            return primitive.to_string();
        }
        match cache.get(type_expr).map(|def| def.category) {
            Some(TypeCategory::Enum) => enum_class_name(type_expr),
            Some(TypeCategory::Struct) => class_name(type_expr),
            _ => interface_name(type_expr),
        }
    }

    /// Map a relationship attribute to its Java type
    #[must_use]
    pub fn relationship_to_java(relationship: &RelationshipAttributeDef) -> String {
        let target = interface_name(relationship.target_type());
        if relationship.cardinality.is_multivalued() || relationship.type_name.starts_with("array<")
        {
            format!("SortedSet<{target}>")
        } else {
            target
        }
    }
}

/// Split `a,b` at the first comma not nested inside `<...>`
fn split_top_level(inner: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (i, ch) in inner.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => return Some((inner[..i].trim(), inner[i + 1..].trim())),
            _ => {}
        }
    }
    None
}

/// Generated class name for an entity or struct type
#[must_use]
pub fn class_name(type_name: &str) -> String {
    CLASS_RENAMES
        .iter()
        .find(|(from, _)| *from == type_name)
        .map_or_else(|| type_name.to_string(), |(_, to)| (*to).to_string())
}

/// Generated interface name for an entity type
#[must_use]
pub fn interface_name(type_name: &str) -> String {
    format!("I{}", class_name(type_name))
}

/// Generated class name for an enum type, e.g. `certificate_status` to `CertificateStatus`
#[must_use]
pub fn enum_class_name(type_name: &str) -> String {
    type_name.to_case(Case::Pascal)
}

/// Java constant for an enum value
#[must_use]
pub fn enum_constant(value: &str) -> String {
    let constant = value.to_case(Case::UpperSnake);
    if constant.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{constant}")
    } else {
        constant
    }
}

/// Java field name for an attribute, escaping reserved words
#[must_use]
pub fn field_name(attribute: &str) -> String {
    if JAVA_KEYWORDS.contains(&attribute) {
        format!("{attribute}_")
    } else {
        attribute.to_string()
    }
}

/// Make text safe inside a `/** ... */` block
#[must_use]
pub fn escape_javadoc(text: &str) -> String {
    text.replace("*/", "*&#47;")
}

/// Make text safe inside a Markdown table cell
#[must_use]
pub fn escape_table_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

/// Wrap text to a specific line width
#[must_use]
pub fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.is_empty() {
            current_line = word.to_string();
        } else if current_line.len() + 1 + word.len() <= width {
            current_line.push(' ');
            current_line.push_str(word);
        } else {
            lines.push(current_line);
            current_line = word.to_string();
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
        .iter()
        .map(|line| format!("{indent}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_java_type_mapping() {
        let cache = TypeDefCache::from_defs([
            TypeDefinition::structure("PopularityInsights"),
            TypeDefinition::enumeration("certificate_status"),
        ]);

        assert_eq!(TypeMapper::to_java("string", Cardinality::Single, &cache), "String");
        assert_eq!(TypeMapper::to_java("date", Cardinality::Single, &cache), "Long");
        assert_eq!(
            TypeMapper::to_java("array<string>", Cardinality::Set, &cache),
            "SortedSet<String>"
        );
        assert_eq!(
            TypeMapper::to_java("array<PopularityInsights>", Cardinality::List, &cache),
            "List<PopularityInsights>"
        );
        assert_eq!(
            TypeMapper::to_java("map<string,array<string>>", Cardinality::Single, &cache),
            "Map<String, SortedSet<String>>"
        );
        assert_eq!(
            TypeMapper::to_java("certificate_status", Cardinality::Single, &cache),
            "CertificateStatus"
        );
        assert_eq!(
            TypeMapper::to_java("AtlasGlossaryTerm", Cardinality::Single, &cache),
            "IGlossaryTerm"
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(class_name("AtlasGlossary"), "Glossary");
        assert_eq!(class_name("MCIncident"), "MCIncident");
        assert_eq!(enum_constant("VERIFIED"), "VERIFIED");
        assert_eq!(enum_constant("inProgress"), "IN_PROGRESS");
        assert_eq!(field_name("default"), "default_");
        assert_eq!(field_name("columns"), "columns");
        assert_eq!(escape_javadoc("a */ b"), "a *&#47; b");
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(wrap_text("one two three", 7, " * "), " * one two\n * three");
    }
}
