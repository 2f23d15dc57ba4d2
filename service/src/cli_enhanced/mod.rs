//! Command-line interface for the type generator.

mod app;
mod types;

pub use app::TypegenApp;
pub use types::{GenerateTarget, PackageCommand, TypegenCli, TypegenCommand};

/// Main entry point for the CLI
///
/// # Errors
/// Returns error if CLI execution fails or encounters invalid arguments.
pub async fn run() -> atlan_core::Result<()> {
    TypegenApp::from_args().run().await
}
