//! Markdown documentation generator
//!
//! Writes one page per entity type plus an `index.md`. Each page shows the
//! resolved inheritance chain as a Mermaid diagram, the type's own
//! attributes, the relationships it introduces and the ones it inherits,
//! grouped by the ancestor that introduces them.

use super::base::escape_table_cell;
use super::traits::{GeneratedOutput, Generator, GeneratorError, GeneratorOptions, GeneratorResult};
use crate::model::ResolvedModel;
use atlan_core::prelude::*;
use indexmap::IndexMap;
use std::fmt::Write;

/// Markdown documentation generator
pub struct MarkdownGenerator {
    options: GeneratorOptions,
    diagrams: bool,
}

impl MarkdownGenerator {
    /// Convert `fmt::Error` to `GeneratorError`
    fn fmt_error_to_generator_error(e: std::fmt::Error) -> GeneratorError {
        GeneratorError::Io(std::io::Error::other(e))
    }

    /// Create a new Markdown generator
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: GeneratorOptions::default(),
            diagrams: true,
        }
    }

    /// Create generator with options
    #[must_use]
    pub fn with_options(options: GeneratorOptions) -> Self {
        Self {
            options,
            ..Self::new()
        }
    }

    /// Enable or disable Mermaid diagrams
    #[must_use]
    pub fn with_diagrams(mut self, enabled: bool) -> Self {
        self.diagrams = enabled;
        self
    }

    /// Mermaid `graph TD` from the root down to `type_name`, plus its direct subtypes
    fn generate_diagram(type_name: &str, model: &ResolvedModel) -> GeneratorResult<String> {
        let mut output = String::new();
        let mut chain = model.relationships().ancestor_chain(type_name);
        chain.reverse();
        chain.push(type_name.to_string());

        writeln!(&mut output, "```mermaid").map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "graph TD").map_err(Self::fmt_error_to_generator_error)?;
        for pair in chain.windows(2) {
            writeln!(&mut output, "    {} --> {}", pair[0], pair[1])
                .map_err(Self::fmt_error_to_generator_error)?;
        }
        for child in model.resolved_subtypes(type_name) {
            writeln!(&mut output, "    {type_name} --> {child}")
                .map_err(Self::fmt_error_to_generator_error)?;
        }
        writeln!(&mut output, "    style {type_name} stroke-width:3px")
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "```").map_err(Self::fmt_error_to_generator_error)?;
        Ok(output)
    }

    /// Link to another type's page, or plain text for types without a page
    fn type_link(type_name: &str, model: &ResolvedModel) -> String {
        match model.cache().get(type_name) {
            Some(def) if def.category == TypeCategory::Entity => {
                format!("[{type_name}]({type_name}.md)")
            }
            _ => format!("`{type_name}`"),
        }
    }

    /// Generate the page for one entity type
    fn generate_entity(&self, def: &TypeDefinition, model: &ResolvedModel) -> GeneratorResult<String> {
        let mut output = String::new();
        let relationships = model.relationships();

        writeln!(&mut output, "# {}\n", def.name).map_err(Self::fmt_error_to_generator_error)?;
        if self.options.include_docs
            && let Some(description) = &def.description
        {
            writeln!(&mut output, "{description}\n").map_err(Self::fmt_error_to_generator_error)?;
        }

        writeln!(&mut output, "## Inheritance\n").map_err(Self::fmt_error_to_generator_error)?;
        if self.diagrams {
            let diagram = Self::generate_diagram(&def.name, model)?;
            writeln!(&mut output, "{diagram}").map_err(Self::fmt_error_to_generator_error)?;
        }
        writeln!(&mut output, "| Property | Value |").map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "|----------|-------|").map_err(Self::fmt_error_to_generator_error)?;
        if let Some(supertype) = model.supertype_of(&def.name) {
            writeln!(&mut output, "| Supertype | {} |", Self::type_link(supertype, model))
                .map_err(Self::fmt_error_to_generator_error)?;
        }
        if !def.super_types.is_empty() {
            writeln!(&mut output, "| Declared supertypes | {} |", def.super_types.join(", "))
                .map_err(Self::fmt_error_to_generator_error)?;
        }
        if let Some(resolution) = model.resolution_of(&def.name) {
            writeln!(&mut output, "| Resolution | {} |", resolution.rule())
                .map_err(Self::fmt_error_to_generator_error)?;
        }
        let subtypes = model.resolved_subtypes(&def.name);
        if !subtypes.is_empty() {
            let links: Vec<String> = subtypes.iter().map(|s| Self::type_link(s, model)).collect();
            writeln!(&mut output, "| Subtypes | {} |", links.join(", "))
                .map_err(Self::fmt_error_to_generator_error)?;
        }

        if !def.attribute_defs.is_empty() {
            writeln!(&mut output, "\n## Attributes\n").map_err(Self::fmt_error_to_generator_error)?;
            writeln!(&mut output, "| Attribute | Type | Cardinality | Description |")
                .map_err(Self::fmt_error_to_generator_error)?;
            writeln!(&mut output, "|-----------|------|-------------|-------------|")
                .map_err(Self::fmt_error_to_generator_error)?;
            for attr in &def.attribute_defs {
                writeln!(
                    &mut output,
                    "| `{}` | `{}` | {:?} | {} |",
                    attr.name,
                    attr.type_name,
                    attr.cardinality,
                    escape_table_cell(attr.description.as_deref().unwrap_or(""))
                )
                .map_err(Self::fmt_error_to_generator_error)?;
            }
        }

        let introduced = relationships.new_relationships(&def.name).ok_or_else(|| {
            GeneratorError::Validation(format!("type '{}' was not resolved", def.name))
        })?;
        if !introduced.is_empty() {
            writeln!(&mut output, "\n## Relationships\n").map_err(Self::fmt_error_to_generator_error)?;
            writeln!(&mut output, "| Relationship | Target | Cardinality | Description |")
                .map_err(Self::fmt_error_to_generator_error)?;
            writeln!(&mut output, "|--------------|--------|-------------|-------------|")
                .map_err(Self::fmt_error_to_generator_error)?;
            for rel in introduced.iter().filter_map(|name| def.relationship(name)) {
                writeln!(
                    &mut output,
                    "| `{}` | {} | {:?} | {} |",
                    rel.name,
                    Self::type_link(rel.target_type(), model),
                    rel.cardinality,
                    escape_table_cell(rel.description.as_deref().unwrap_or(""))
                )
                .map_err(Self::fmt_error_to_generator_error)?;
            }
        }

        let inherited = relationships
            .inherited_relationships(&def.name)
            .unwrap_or_default();
        if !inherited.is_empty() {
            writeln!(&mut output, "\n## Inherited relationships\n")
                .map_err(Self::fmt_error_to_generator_error)?;

            // Group by introducing ancestor, nearest ancestor first
            let chain = relationships.ancestor_chain(&def.name);
            let mut groups: IndexMap<&str, Vec<&str>> = chain
                .iter()
                .map(|ancestor| (ancestor.as_str(), Vec::new()))
                .collect();
            if let Some(parent) = relationships.supertype_of(&def.name) {
                for name in &inherited {
                    if let Some(owner) = relationships.introduced_by(parent, name) {
                        groups.entry(owner).or_default().push(name.as_str());
                    }
                }
            }
            for (ancestor, names) in groups.iter().filter(|(_, names)| !names.is_empty()) {
                writeln!(&mut output, "### From {}\n", Self::type_link(ancestor, model))
                    .map_err(Self::fmt_error_to_generator_error)?;
                for name in names {
                    writeln!(&mut output, "- `{name}`").map_err(Self::fmt_error_to_generator_error)?;
                }
                writeln!(&mut output).map_err(Self::fmt_error_to_generator_error)?;
            }
        }

        Ok(output)
    }

    /// Generate `index.md`
    fn generate_index(model: &ResolvedModel) -> GeneratorResult<String> {
        let mut output = String::new();
        let cache = model.cache();

        writeln!(&mut output, "# Atlan type model\n").map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "| Property | Value |").map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "|----------|-------|").map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "| Root type | `{}` |", model.root_type())
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "| Entity types | {} |", cache.entity_defs().count())
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "| Struct types | {} |", cache.struct_defs().count())
            .map_err(Self::fmt_error_to_generator_error)?;
        writeln!(&mut output, "| Enum types | {} |", cache.enum_defs().count())
            .map_err(Self::fmt_error_to_generator_error)?;

        let mut entities: Vec<&TypeDefinition> = cache.entity_defs().collect();
        entities.sort_by(|a, b| a.name.cmp(&b.name));
        if !entities.is_empty() {
            writeln!(&mut output, "\n## Entity types\n").map_err(Self::fmt_error_to_generator_error)?;
            writeln!(&mut output, "| Type | Supertype | New relationships |")
                .map_err(Self::fmt_error_to_generator_error)?;
            writeln!(&mut output, "|------|-----------|-------------------|")
                .map_err(Self::fmt_error_to_generator_error)?;
            for def in entities {
                let supertype = model
                    .supertype_of(&def.name)
                    .map(|s| Self::type_link(s, model))
                    .unwrap_or_default();
                let count = model
                    .relationships()
                    .new_relationships(&def.name)
                    .map_or(0, std::collections::BTreeSet::len);
                writeln!(
                    &mut output,
                    "| [{0}]({0}.md) | {supertype} | {count} |",
                    def.name
                )
                .map_err(Self::fmt_error_to_generator_error)?;
            }
        }

        for (heading, defs) in [
            ("Struct types", cache.struct_defs().collect::<Vec<_>>()),
            ("Enum types", cache.enum_defs().collect::<Vec<_>>()),
        ] {
            if defs.is_empty() {
                continue;
            }
            writeln!(&mut output, "\n## {heading}\n").map_err(Self::fmt_error_to_generator_error)?;
            let mut names: Vec<&str> = defs.iter().map(|def| def.name.as_str()).collect();
            names.sort_unstable();
            for name in names {
                writeln!(&mut output, "- `{name}`").map_err(Self::fmt_error_to_generator_error)?;
            }
        }

        Ok(output)
    }
}

impl Default for MarkdownGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for MarkdownGenerator {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn description(&self) -> &'static str {
        "Generate Markdown documentation of the resolved type hierarchy"
    }

    fn file_extension(&self) -> &'static str {
        "md"
    }

    fn generate(&self, model: &ResolvedModel) -> GeneratorResult<Vec<GeneratedOutput>> {
        let mut outputs = vec![GeneratedOutput::new("index.md", Self::generate_index(model)?)];
        for def in model.cache().entity_defs() {
            outputs.push(GeneratedOutput::new(
                format!("{}.md", def.name),
                self.generate_entity(def, model)?,
            ));
        }
        Ok(outputs)
    }
}
