//! Code and documentation generators over a resolved type model
//!
//! Every generator implements [`Generator`] and reads the same immutable
//! [`ResolvedModel`](crate::model::ResolvedModel) snapshot.

pub mod base;
pub mod java;
pub mod markdown;
pub mod traits;

pub use java::JavaGenerator;
pub use markdown::MarkdownGenerator;
pub use traits::{
    GeneratedOutput, Generator, GeneratorError, GeneratorOptions, GeneratorResult, IndentStyle,
};

use std::path::{Path, PathBuf};
use tracing::info;

/// Write generated outputs below `output_dir`, creating directories as needed
///
/// Returns the paths written, in output order.
///
/// # Errors
///
/// Returns `GeneratorError::Io` if a directory or file cannot be written.
pub async fn write_outputs(
    output_dir: &Path,
    outputs: &[GeneratedOutput],
) -> GeneratorResult<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(outputs.len());
    for output in outputs {
        let path = output_dir.join(&output.filename);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, &output.content).await?;
        written.push(path);
    }
    info!(
        files = written.len(),
        dir = %output_dir.display(),
        "wrote generated files"
    );
    Ok(written)
}
