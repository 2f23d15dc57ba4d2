//! Type generator CLI application

use super::types::{GenerateTarget, PackageCommand, TypegenCli, TypegenCommand};
use crate::cache::{AtlanApiSource, JsonFileSource, TypeDefCache, TypeDefSource};
use crate::config::TypegenConfig;
use crate::generator::{
    Generator, GeneratorOptions, JavaGenerator, MarkdownGenerator, write_outputs,
};
use crate::inheritance::{SupertypeResolver, ambiguities};
use crate::model::ResolvedModel;
use crate::packages::ConnectionDelete;
use atlan_core::{AtlanError, Result};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Type generator CLI application
pub struct TypegenApp {
    cli: TypegenCli,
}

impl TypegenApp {
    /// Create the application from command line arguments
    #[must_use]
    pub fn from_args() -> Self {
        Self {
            cli: TypegenCli::parse(),
        }
    }

    /// Create the application with an already parsed command line
    #[must_use]
    pub fn new(cli: TypegenCli) -> Self {
        Self { cli }
    }

    /// Run the application
    ///
    /// # Errors
    ///
    /// Returns error if configuration, loading, resolution or the command itself fails.
    pub async fn run(self) -> Result<()> {
        self.init_logging();
        info!("Starting atlan-typegen");

        match self.execute_command().await {
            Ok(()) => {
                info!("Command completed successfully");
                Ok(())
            }
            Err(err) => {
                error!("Command failed: {}", err);
                if !self.cli.quiet {
                    eprintln!("{}: {err}", "Error".red());
                }
                Err(err)
            }
        }
    }

    /// Configure tracing subscriber based on CLI flags; `RUST_LOG` wins when set
    fn init_logging(&self) {
        let level = if self.cli.quiet {
            "error"
        } else if self.cli.verbose {
            "debug"
        } else {
            "info"
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        // A subscriber may already be installed when embedded; keep it.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    async fn execute_command(&self) -> Result<()> {
        let config = TypegenConfig::load(self.cli.config.as_deref())?;
        match &self.cli.command {
            TypegenCommand::Generate { target, output } => {
                let model = self.load_model(&config).await?;
                self.generate_command(&model, &config, *target, output.as_deref())
                    .await
            }
            TypegenCommand::Resolve { types } => {
                let model = self.load_model(&config).await?;
                self.resolve_command(&model, types)
            }
            TypegenCommand::Check { strict } => {
                let model = self.load_model(&config).await?;
                self.check_command(&model, *strict)
            }
            TypegenCommand::Package { package } => self.package_command(package).await,
        }
    }

    /// Source chosen by precedence: `--typedefs`, then `source.typedefs_file`, then the API
    fn source(&self, config: &TypegenConfig) -> Result<Box<dyn TypeDefSource>> {
        if let Some(path) = &self.cli.typedefs {
            return Ok(Box::new(JsonFileSource::new(path.clone())));
        }
        if let Some(path) = &config.source.typedefs_file {
            return Ok(Box::new(JsonFileSource::new(path.clone())));
        }
        Ok(Box::new(AtlanApiSource::from_config(&config.source)?))
    }

    async fn load_model(&self, config: &TypegenConfig) -> Result<ResolvedModel> {
        let source = self.source(config)?;
        let mut cache = TypeDefCache::new();
        cache.load(source.as_ref()).await?;
        ResolvedModel::build(
            cache.into_shared(),
            SupertypeResolver::from_config(&config.resolution),
            config.resolution.max_passes,
        )
    }

    async fn generate_command(
        &self,
        model: &ResolvedModel,
        config: &TypegenConfig,
        target: GenerateTarget,
        output: Option<&Path>,
    ) -> Result<()> {
        let options = GeneratorOptions::new().with_docs(config.generator.include_docs);
        let dir_for = |configured: &str, subdir: &str| -> PathBuf {
            match (output, target) {
                (Some(root), GenerateTarget::All) => root.join(subdir),
                (Some(root), _) => root.to_path_buf(),
                (None, _) => PathBuf::from(configured),
            }
        };

        let mut runs: Vec<(Box<dyn Generator>, PathBuf)> = Vec::new();
        if matches!(target, GenerateTarget::Java | GenerateTarget::All) {
            runs.push((
                Box::new(
                    JavaGenerator::new()
                        .with_package(config.generator.java_package.clone())
                        .with_options(options.clone()),
                ),
                dir_for(&config.generator.java_output_dir, "java"),
            ));
        }
        if matches!(target, GenerateTarget::Markdown | GenerateTarget::All) {
            runs.push((
                Box::new(MarkdownGenerator::with_options(options)),
                dir_for(&config.generator.docs_output_dir, "docs"),
            ));
        }

        for (generator, dir) in runs {
            let outputs = generator.generate(model).map_err(AtlanError::from)?;
            let written = write_outputs(&dir, &outputs)
                .await
                .map_err(AtlanError::from)?;
            if !self.cli.quiet {
                println!(
                    "{} {} wrote {} files to {}",
                    "✓".green(),
                    generator.name().bold(),
                    written.len(),
                    dir.display()
                );
            }
        }
        Ok(())
    }

    fn resolve_command(&self, model: &ResolvedModel, types: &[String]) -> Result<()> {
        let names: Vec<String> = if types.is_empty() {
            let mut all: Vec<String> = model
                .cache()
                .entity_defs()
                .map(|def| def.name.clone())
                .collect();
            all.sort();
            all
        } else {
            types.to_vec()
        };

        for name in &names {
            let resolution = model
                .resolution_of(name)
                .ok_or_else(|| AtlanError::invalid_request(format!("unknown type '{name}'")))?;
            if self.cli.quiet {
                continue;
            }
            println!(
                "{} -> {} ({})",
                name.bold(),
                resolution.supertype(),
                resolution.rule()
            );
            let chain = model.relationships().ancestor_chain(name);
            println!("  chain: {}", chain.join(" -> "));
            if let Some(introduced) = model.relationships().new_relationships(name)
                && !introduced.is_empty()
            {
                let list: Vec<&str> = introduced.iter().map(String::as_str).collect();
                println!("  new relationships: {}", list.join(", "));
            }
        }
        Ok(())
    }

    fn check_command(&self, model: &ResolvedModel, strict: bool) -> Result<()> {
        let ambiguous = ambiguities(model.cache(), model.resolver());
        let drift = model.struct_registry_drift();
        if !drift.is_empty() {
            warn!(
                missing_from_registry = ?drift.missing_from_registry,
                not_in_source = ?drift.not_in_source,
                "struct registry differs from the loaded typedefs"
            );
        }

        if !self.cli.quiet {
            if ambiguous.is_empty() {
                println!("{} no ambiguous inheritance", "✓".green());
            }
            for item in &ambiguous {
                println!(
                    "{} {} declares {} and resolves to {}; add an override to pin it",
                    "!".yellow(),
                    item.type_name.bold(),
                    item.candidates.join(", "),
                    item.chosen
                );
            }
            if drift.is_empty() {
                println!("{} struct registry matches the typedefs", "✓".green());
            }
            for name in &drift.missing_from_registry {
                println!("{} struct {} has no registered variant", "!".yellow(), name.bold());
            }
            for name in &drift.not_in_source {
                println!("{} registered struct {} is not in the typedefs", "!".yellow(), name.bold());
            }
        }

        let issues = ambiguous.len() + drift.missing_from_registry.len() + drift.not_in_source.len();
        if strict && issues > 0 {
            return Err(AtlanError::other(format!("check reported {issues} issue(s)")));
        }
        Ok(())
    }

    async fn package_command(&self, package: &PackageCommand) -> Result<()> {
        match package {
            PackageCommand::ConnectionDelete {
                qualified_name,
                purge,
                output,
            } => {
                let json = ConnectionDelete::creator(qualified_name, *purge)?
                    .to_workflow()
                    .to_json_pretty()?;
                match output {
                    Some(path) => {
                        tokio::fs::write(path, json).await?;
                        if !self.cli.quiet {
                            println!("{} wrote {}", "✓".green(), path.display());
                        }
                    }
                    None => println!("{json}"),
                }
                Ok(())
            }
        }
    }
}
