//! Java model class generator
//!
//! Emits one source file per entity, struct and enum type. Entity classes
//! extend their resolved single supertype and declare only what is new at
//! their level: their own plain attributes and the relationship attributes
//! no ancestor already carries.

use super::base::{
    TypeMapper, class_name, enum_class_name, enum_constant, escape_javadoc, field_name,
    interface_name, wrap_text,
};
use super::traits::{GeneratedOutput, Generator, GeneratorError, GeneratorOptions, GeneratorResult};
use crate::model::ResolvedModel;
use atlan_core::prelude::*;
use std::collections::BTreeSet;
use std::fmt::Write;
use tracing::debug;

/// Default Java package of the generated model
pub const DEFAULT_JAVA_PACKAGE: &str = "com.atlan.model";

const GENERATED_BANNER: &str = "// Generated by atlan-typegen. Do not edit by hand.";

/// Java model generator
pub struct JavaGenerator {
    package: String,
    options: GeneratorOptions,
}

impl Default for JavaGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaGenerator {
    /// Create a generator targeting the default package
    #[must_use]
    pub fn new() -> Self {
        Self {
            package: DEFAULT_JAVA_PACKAGE.to_string(),
            options: GeneratorOptions::default(),
        }
    }

    /// Set the base Java package
    #[must_use]
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Create generator with options
    #[must_use]
    pub fn with_options(mut self, options: GeneratorOptions) -> Self {
        self.options = options;
        self
    }

    /// Base Java package
    #[must_use]
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Convert `fmt::Error` to `GeneratorError`
    fn fmt_error_to_generator_error(e: std::fmt::Error) -> GeneratorError {
        GeneratorError::Io(std::io::Error::other(e))
    }

    fn validate_package(&self) -> GeneratorResult<()> {
        let valid = !self.package.is_empty()
            && self.package.split('.').all(|segment| {
                segment
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
                    && segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            });
        if valid {
            Ok(())
        } else {
            Err(GeneratorError::Configuration(format!(
                "invalid Java package '{}'",
                self.package
            )))
        }
    }

    fn write_header(&self, output: &mut String, subpackage: &str, imports: &BTreeSet<String>) -> GeneratorResult<()> {
        writeln!(output, "{GENERATED_BANNER}").map_err(Self::fmt_error_to_generator_error)?;
        writeln!(output, "package {}.{subpackage};", self.package)
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(output).map_err(Self::fmt_error_to_generator_error)?;
        for import in imports {
            writeln!(output, "import {import};").map_err(Self::fmt_error_to_generator_error)?;
        }
        if !imports.is_empty() {
            writeln!(output).map_err(Self::fmt_error_to_generator_error)?;
        }
        Ok(())
    }

    fn write_doc(&self, output: &mut String, text: Option<&str>, level: usize) -> GeneratorResult<()> {
        let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
            return Ok(());
        };
        if !self.options.include_docs {
            return Ok(());
        }
        let indent = self.options.indent.to_string(level);
        writeln!(output, "{indent}/**").map_err(Self::fmt_error_to_generator_error)?;
        let wrapped = wrap_text(&escape_javadoc(text), 100, &format!("{indent} * "));
        writeln!(output, "{wrapped}").map_err(Self::fmt_error_to_generator_error)?;
        writeln!(output, "{indent} */").map_err(Self::fmt_error_to_generator_error)?;
        Ok(())
    }

    /// Imports needed by a set of Java field types
    fn imports_for<'a>(&self, field_types: impl IntoIterator<Item = &'a String>) -> BTreeSet<String> {
        let mut imports = BTreeSet::new();
        for java_type in field_types {
            if java_type.contains("SortedSet<") {
                imports.insert("java.util.SortedSet".to_string());
            }
            if java_type.contains("List<") {
                imports.insert("java.util.List".to_string());
            }
            if java_type.contains("Map<") {
                imports.insert("java.util.Map".to_string());
            }
        }
        imports
    }

    /// Generate the class for one entity type
    fn generate_entity(&self, def: &TypeDefinition, model: &ResolvedModel) -> GeneratorResult<GeneratedOutput> {
        let class = class_name(&def.name);
        let supertype = model.supertype_of(&def.name);

        let attributes: Vec<(String, String, Option<&str>)> = def
            .attribute_defs
            .iter()
            .map(|attr| {
                (
                    field_name(&attr.name),
                    TypeMapper::to_java(&attr.type_name, attr.cardinality, model.cache()),
                    attr.description.as_deref(),
                )
            })
            .collect();

        let new_relationships = model
            .relationships()
            .new_relationships(&def.name)
            .ok_or_else(|| {
                GeneratorError::Validation(format!("type '{}' was not resolved", def.name))
            })?;
        let relationships: Vec<(String, String, Option<&str>)> = new_relationships
            .iter()
            .filter_map(|name| def.relationship(name))
            .map(|rel| {
                (
                    field_name(&rel.name),
                    TypeMapper::relationship_to_java(rel),
                    rel.description.as_deref(),
                )
            })
            .collect();

        let mut imports = self.imports_for(
            attributes
                .iter()
                .chain(relationships.iter())
                .map(|(_, java_type, _)| java_type),
        );
        imports.insert(format!("{}.enums.*", self.package));
        imports.insert(format!("{}.structs.*", self.package));

        let mut output = String::new();
        self.write_header(&mut output, "assets", &imports)?;
        self.write_doc(&mut output, def.description.as_deref(), 0)?;

        let extends = supertype
            .map(|parent| format!(" extends {}", class_name(parent)))
            .unwrap_or_default();
        writeln!(
            &mut output,
            "public class {class}{extends} implements {} {{",
            interface_name(&def.name)
        )
        .map_err(Self::fmt_error_to_generator_error)?;

        let indent = self.options.indent.single();
        writeln!(&mut output, "{indent}public static final String TYPE_NAME = \"{}\";", def.name)
            .map_err(Self::fmt_error_to_generator_error)?;

        for (label, fields) in [("Attributes", &attributes), ("Relationships", &relationships)] {
            if fields.is_empty() {
                continue;
            }
            writeln!(&mut output).map_err(Self::fmt_error_to_generator_error)?;
            writeln!(&mut output, "{indent}// {label}").map_err(Self::fmt_error_to_generator_error)?;
            for (name, java_type, description) in fields.iter() {
                self.write_doc(&mut output, *description, 1)?;
                writeln!(&mut output, "{indent}{java_type} {name};")
                    .map_err(Self::fmt_error_to_generator_error)?;
            }
        }
        writeln!(&mut output, "}}").map_err(Self::fmt_error_to_generator_error)?;

        Ok(GeneratedOutput::new(format!("assets/{class}.java"), output))
    }

    /// Generate the class for one struct type
    fn generate_struct(&self, def: &TypeDefinition, model: &ResolvedModel) -> GeneratorResult<GeneratedOutput> {
        let class = class_name(&def.name);
        let fields: Vec<(String, String, Option<&str>)> = def
            .attribute_defs
            .iter()
            .map(|attr| {
                (
                    field_name(&attr.name),
                    TypeMapper::to_java(&attr.type_name, attr.cardinality, model.cache()),
                    attr.description.as_deref(),
                )
            })
            .collect();

        let mut imports = self.imports_for(fields.iter().map(|(_, java_type, _)| java_type));
        imports.insert(format!("{}.enums.*", self.package));

        let mut output = String::new();
        self.write_header(&mut output, "structs", &imports)?;
        self.write_doc(&mut output, def.description.as_deref(), 0)?;
        writeln!(&mut output, "public class {class} extends AtlanStruct {{")
            .map_err(Self::fmt_error_to_generator_error)?;

        let indent = self.options.indent.single();
        writeln!(&mut output, "{indent}public static final String TYPE_NAME = \"{}\";", def.name)
            .map_err(Self::fmt_error_to_generator_error)?;
        for (name, java_type, description) in &fields {
            writeln!(&mut output).map_err(Self::fmt_error_to_generator_error)?;
            self.write_doc(&mut output, *description, 1)?;
            writeln!(&mut output, "{indent}{java_type} {name};")
                .map_err(Self::fmt_error_to_generator_error)?;
        }
        writeln!(&mut output, "}}").map_err(Self::fmt_error_to_generator_error)?;

        Ok(GeneratedOutput::new(format!("structs/{class}.java"), output))
    }

    /// Generate the enum for one enum type
    fn generate_enum(&self, def: &TypeDefinition) -> GeneratorResult<GeneratedOutput> {
        let class = enum_class_name(&def.name);
        let mut elements: Vec<&EnumElementDef> = def.element_defs.iter().collect();
        elements.sort_by_key(|element| element.ordinal);

        let mut output = String::new();
        self.write_header(&mut output, "enums", &BTreeSet::new())?;
        self.write_doc(&mut output, def.description.as_deref(), 0)?;
        writeln!(&mut output, "public enum {class} {{").map_err(Self::fmt_error_to_generator_error)?;

        let indent = self.options.indent.single();
        for (i, element) in elements.iter().enumerate() {
            self.write_doc(&mut output, element.description.as_deref(), 1)?;
            let terminator = if i + 1 == elements.len() { ";" } else { "," };
            writeln!(
                &mut output,
                "{indent}{}(\"{}\"){terminator}",
                enum_constant(&element.value),
                element.value.replace('"', "\\\"")
            )
            .map_err(Self::fmt_error_to_generator_error)?;
        }
        if elements.is_empty() {
            writeln!(&mut output, "{indent};").map_err(Self::fmt_error_to_generator_error)?;
        }

        writeln!(&mut output).map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "{indent}private final String value;")
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output).map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "{indent}{class}(String value) {{")
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "{indent}{indent}this.value = value;")
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "{indent}}}").map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output).map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "{indent}public String getValue() {{")
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "{indent}{indent}return value;")
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "{indent}}}").map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "}}").map_err(Self::fmt_error_to_generator_error)?;

        Ok(GeneratedOutput::new(format!("enums/{class}.java"), output))
    }
}

impl Generator for JavaGenerator {
    fn name(&self) -> &'static str {
        "java"
    }

    fn description(&self) -> &'static str {
        "Generate Java model classes with single inheritance and de-duplicated relationships"
    }

    fn file_extension(&self) -> &'static str {
        "java"
    }

    fn generate(&self, model: &ResolvedModel) -> GeneratorResult<Vec<GeneratedOutput>> {
        self.validate_package()?;

        let cache = model.cache();
        let mut outputs = Vec::with_capacity(cache.len());
        for def in cache.entity_defs() {
            outputs.push(self.generate_entity(def, model)?);
        }
        for def in cache.struct_defs() {
            outputs.push(self.generate_struct(def, model)?);
        }
        for def in cache.enum_defs() {
            outputs.push(self.generate_enum(def)?);
        }

        debug!(files = outputs.len(), package = %self.package, "generated Java sources");
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TypeDefCache;
    use crate::inheritance::{OverrideTable, SupertypeResolver};

    #[test]
    fn test_enum_output() {
        let model = ResolvedModel::build(
            TypeDefCache::from_defs([TypeDefinition::enumeration("certificate_status")
                .with_element("DRAFT")
                .with_element("VERIFIED")])
            .into_shared(),
            SupertypeResolver::new("Reference", OverrideTable::new()),
            0,
        )
        .unwrap();

        let outputs = JavaGenerator::new().generate(&model).unwrap();
        assert_eq!(outputs.len(), 1);
        assert_eq!(outputs[0].filename, "enums/CertificateStatus.java");
        assert!(outputs[0].content.contains("package com.atlan.model.enums;"));
        assert!(outputs[0].content.contains("    DRAFT(\"DRAFT\"),\n    VERIFIED(\"VERIFIED\");"));
    }

    #[test]
    fn test_invalid_package_rejected() {
        let model = ResolvedModel::build(
            TypeDefCache::from_defs([TypeDefinition::entity("Asset")]).into_shared(),
            SupertypeResolver::default(),
            0,
        )
        .unwrap();

        let err = JavaGenerator::new()
            .with_package("com.atlan.1model")
            .generate(&model)
            .unwrap_err();
        assert!(matches!(err, GeneratorError::Configuration(_)));
    }
}
