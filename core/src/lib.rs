//! # Atlan model core
//!
//! Core types for working with the Atlan metadata model in Rust.
//!
//! This crate provides the building blocks shared by the generators and
//! package builders:
//!
//! - **Type definitions** as served by the typedef API (entities, structs, enums)
//! - **Struct values** with closed, `typeName`-keyed polymorphic dispatch
//! - **Asset envelopes** with an open "indistinct" catch-all
//! - **Connector types** and their categories
//! - **Search filters** in the index-search backend's query layout
//! - A single error type used across the workspace

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(missing_docs)] // Field-level docs live on the typedefs themselves

/// Core error types for Atlan operations
pub mod error;

/// Type definitions for entity, struct and enum types
pub mod types;

/// Struct value types and discriminator dispatch
pub mod structs;

/// Asset envelopes
pub mod asset;

/// Connector types and categories
pub mod connector;

/// Search filter queries
pub mod filter;

// Re-export commonly used types
pub use asset::Asset;
pub use connector::{AtlanConnectorType, ConnectorCategory};
pub use error::{AtlanError, Result};
pub use filter::{FilterClause, FilterQuery};
pub use serde_json::Value;
pub use structs::AtlanStruct;
pub use types::{
    AttributeDef, Cardinality, EnumElementDef, RelationshipAttributeDef, TypeCategory,
    TypeDefResponse, TypeDefinition,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::asset::Asset;
    pub use crate::connector::*;
    pub use crate::error::{AtlanError, Result};
    pub use crate::filter::{FilterClause, FilterQuery};
    pub use crate::structs::AtlanStruct;
    pub use crate::types::*;
}
