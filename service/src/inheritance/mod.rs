//! Flattening of the multi-inheritance type graph
//!
//! This module maps the metamodel's multiple inheritance onto single
//! inheritance:
//! - Picking one supertype per type, with an authored override table
//! - Computing which relationship attributes are new at each level

pub mod relationships;
pub mod resolver;

pub use relationships::RelationshipIndex;
pub use resolver::{
    Ambiguity, DEFAULT_ROOT_TYPE, OverrideTable, Resolution, SupertypeResolver, ambiguities,
};
