//! Core generator traits and types
//!
//! This module defines the fundamental traits and types used by all code generators.

use crate::model::ResolvedModel;
use atlan_core::AtlanError;
use thiserror::Error;

/// Result type for generator operations
pub type GeneratorResult<T> = std::result::Result<T, GeneratorError>;

/// Errors that can occur during code generation
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The model is missing something the generator needs
    #[error("Model validation failed: {0}")]
    Validation(String),

    /// Code generation error
    #[error("Code generation failed: {0}")]
    Generation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Atlan model error
    #[error("Atlan error: {0}")]
    Atlan(#[from] AtlanError),
}

impl From<GeneratorError> for AtlanError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::Atlan(inner) => inner,
            GeneratorError::Io(io) => AtlanError::IoError(io),
            other => AtlanError::generation(other.to_string()),
        }
    }
}

/// Options for code generation
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Include documentation in generated code
    pub include_docs: bool,

    /// Indentation style
    pub indent: IndentStyle,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            include_docs: true,
            indent: IndentStyle::default(),
        }
    }
}

impl GeneratorOptions {
    /// Create new generator options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to include documentation
    #[must_use]
    pub fn with_docs(mut self, include_docs: bool) -> Self {
        self.include_docs = include_docs;
        self
    }

    /// Set indentation style
    #[must_use]
    pub fn with_indent(mut self, indent: IndentStyle) -> Self {
        self.indent = indent;
        self
    }
}

/// Indentation style for generated code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndentStyle {
    /// Use spaces for indentation
    Spaces(usize),
    /// Use tabs for indentation
    Tabs,
}

impl Default for IndentStyle {
    fn default() -> Self {
        Self::Spaces(4)
    }
}

impl IndentStyle {
    /// Get single indentation string
    #[must_use]
    pub fn single(&self) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(*n),
            Self::Tabs => "\t".to_string(),
        }
    }

    /// Get indentation string for given level
    #[must_use]
    pub fn to_string(&self, level: usize) -> String {
        match self {
            Self::Spaces(n) => " ".repeat(n * level),
            Self::Tabs => "\t".repeat(level),
        }
    }
}

/// Generated output from a code generator
#[derive(Debug, Clone)]
pub struct GeneratedOutput {
    /// Generated content
    pub content: String,
    /// Path relative to the output directory
    pub filename: String,
}

impl GeneratedOutput {
    /// Create an output for `filename`
    #[must_use]
    pub fn new(filename: impl Into<String>, content: String) -> Self {
        Self {
            content,
            filename: filename.into(),
        }
    }
}

/// Code generator over a resolved model
pub trait Generator: Send + Sync {
    /// Get generator name
    fn name(&self) -> &str;

    /// Get generator description
    fn description(&self) -> &str;

    /// Get the file extension for generated files
    fn file_extension(&self) -> &str;

    /// Generate every output file for the model
    ///
    /// # Errors
    /// Returns an error if the model lacks something the generator needs or
    /// formatting fails
    fn generate(&self, model: &ResolvedModel) -> GeneratorResult<Vec<GeneratedOutput>>;
}
