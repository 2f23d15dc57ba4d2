//! # Atlan type generator
//!
//! Flattens the Atlan metadata type system into a single-inheritance model
//! and renders it as Java model classes and Markdown documentation. Also
//! builds the workflow documents that run connector packages.
//!
//! ## Overview
//!
//! - **Type definition cache**: fetched once from a tenant or a saved
//!   typedef response, then frozen and shared read-only
//! - **Inheritance resolution**: one supertype per type, with an authored
//!   override table for multiple-inheritance declarations
//! - **Relationship de-duplication**: every relationship attribute is listed
//!   only at the level that introduces it
//! - **Generators**: Java sources and Markdown docs over the resolved model
//! - **Packages**: connection delete and Snowflake crawler/miner workflows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use atlan_typegen::prelude::*;
//!
//! # async fn example() -> atlan_core::Result<()> {
//! let mut cache = TypeDefCache::new();
//! cache.load(&JsonFileSource::new("typedefs.json")).await?;
//!
//! let model = ResolvedModel::build(cache.into_shared(), SupertypeResolver::default(), 0)?;
//! let outputs = JavaGenerator::new().generate(&model)?;
//! write_outputs(std::path::Path::new("generated/java"), &outputs).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::unused_self)] // generator helpers keep &self for option access
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)] // Atlan, Argo, Snowflake are proper nouns
#![allow(clippy::too_many_arguments)] // S3 miner settings come as one group

/// Type definition sources and the fetch-once cache
pub mod cache;

/// Configuration loading and validation
pub mod config;

/// Supertype resolution and relationship de-duplication
pub mod inheritance;

/// Resolved model snapshot shared by the generators
pub mod model;

/// Java and Markdown generators
pub mod generator;

/// Workflow package builders
pub mod packages;

/// Command-line interface
pub mod cli_enhanced;

pub use atlan_core::{AtlanError, Result};
pub use cache::TypeDefCache;
pub use model::ResolvedModel;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cache::{
        AtlanApiSource, InMemorySource, JsonFileSource, TypeDefCache, TypeDefSource,
    };
    pub use crate::config::TypegenConfig;
    pub use crate::generator::{
        GeneratedOutput, Generator, GeneratorError, GeneratorOptions, JavaGenerator,
        MarkdownGenerator, write_outputs,
    };
    pub use crate::inheritance::{
        DEFAULT_ROOT_TYPE, OverrideTable, RelationshipIndex, Resolution, SupertypeResolver,
    };
    pub use crate::model::{RegistryDrift, ResolvedModel};
    pub use crate::packages::{ConnectionDelete, SnowflakeCrawler, SnowflakeMiner, Workflow};
    pub use atlan_core::prelude::*;
}
