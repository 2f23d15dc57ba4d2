//! `atlan-typegen` command-line interface
//!
//! Loads Atlan type definitions, flattens the hierarchy and generates Java
//! models, Markdown docs or workflow package documents.

use atlan_typegen::cli_enhanced;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli_enhanced::run().await?;
    Ok(())
}
