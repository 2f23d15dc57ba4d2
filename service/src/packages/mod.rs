//! Workflow package builders
//!
//! Each package renders a [`Workflow`] document for the orchestrator. The
//! builders only validate and assemble; submitting the document is left to
//! the caller.

pub mod builder;
pub mod connection_delete;
pub mod snowflake;
pub mod workflow;

pub use builder::{PackageBuilder, encode_label_value};
pub use connection_delete::{ConnectionDelete, validate_connection_qualified_name};
pub use snowflake::{AssetFilter, SnowflakeCrawler, SnowflakeMiner};
pub use workflow::{NameValuePair, PackageParameter, Workflow};
