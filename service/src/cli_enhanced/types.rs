//! CLI type definitions and enums

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Atlan type-model generator command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "atlan-typegen",
    version,
    about = "Flatten Atlan type definitions and generate Java models and docs"
)]
pub struct TypegenCli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Read type definitions from a saved typedef response instead of the API
    #[arg(short, long, global = true)]
    pub typedefs: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: TypegenCommand,
}

/// What to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenerateTarget {
    /// Java model classes
    Java,
    /// Markdown documentation
    Markdown,
    /// Both
    All,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum TypegenCommand {
    /// Generate Java sources and/or Markdown docs
    Generate {
        /// Generator to run
        #[arg(long, value_enum, default_value = "all")]
        target: GenerateTarget,
        /// Output directory, overriding the configured one
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how types resolve and which relationships they introduce
    Resolve {
        /// Type names to show; all entity types when empty
        types: Vec<String>,
    },

    /// Report ambiguous inheritance and struct registry drift
    Check {
        /// Exit with an error if anything is reported
        #[arg(long)]
        strict: bool,
    },

    /// Render a workflow package document
    Package {
        /// Package to render
        #[command(subcommand)]
        package: PackageCommand,
    },
}

/// Packages the CLI can render
#[derive(Subcommand, Debug)]
pub enum PackageCommand {
    /// Delete a connection and its assets
    ConnectionDelete {
        /// Connection qualified name, e.g. `default/snowflake/1700000000`
        #[arg(long)]
        qualified_name: String,
        /// Purge assets instead of archiving them
        #[arg(long)]
        purge: bool,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}
