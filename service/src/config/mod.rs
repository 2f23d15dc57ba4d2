//! Configuration loading for the type generator
//!
//! Configuration is read from a `YAML` file with `${VAR:-default}`
//! environment variable substitution. Every section has defaults, so an
//! empty file (or no file at all) yields a usable configuration.

pub mod validation;

use crate::inheritance::resolver::DEFAULT_ROOT_TYPE;
use atlan_core::{AtlanError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Load configuration from `YAML` file with environment variable substitution
///
/// # Errors
///
/// Returns `AtlanError::IoError` if the file cannot be read
/// Returns `AtlanError::ConfigError` if the YAML cannot be parsed
pub fn load_config<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path).map_err(AtlanError::IoError)?;
    parse_config(&contents)
}

/// Parse configuration text after environment variable substitution
///
/// # Errors
///
/// Returns `AtlanError::ConfigError` if the YAML cannot be parsed
pub fn parse_config<T: for<'de> Deserialize<'de>>(contents: &str) -> Result<T> {
    let substituted = substitute_env_vars(contents);
    serde_yaml::from_str(&substituted)
        .map_err(|e| AtlanError::ConfigError(format!("Failed to parse YAML config: {e}")))
}

/// Substitute environment variables in the format ${VAR:-default}
fn substitute_env_vars(content: &str) -> String {
    let re = match regex::Regex::new(r"\$\{([^}:]+)(?::(-)?([^}]*))?\}") {
        Ok(regex) => regex,
        Err(_) => return content.to_string(),
    };

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default_value = caps.get(3).map_or("", |m| m.as_str());

        env::var(var_name).unwrap_or_else(|_| default_value.to_string())
    })
    .to_string()
}

/// Complete generator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TypegenConfig {
    /// Where type definitions come from
    pub source: SourceConfig,
    /// Inheritance resolution settings
    pub resolution: ResolutionConfig,
    /// Output settings for the generators
    pub generator: GeneratorConfig,
}

impl TypegenConfig {
    /// Load from `path`, or fall back to defaults when no path is given
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: Self = match path {
            Some(path) => load_config(path)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values that serde cannot
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::ConfigError` describing every invalid value.
    pub fn validate(&self) -> Result<()> {
        validation::validate_values(self)
    }
}

/// Type definition source configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    /// Tenant URL, e.g. `https://tenant.atlan.com`
    pub base_url: Option<String>,
    /// API token sent as a bearer token
    pub api_token: Option<String>,
    /// Saved typedef response to read instead of calling the API
    pub typedefs_file: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_token: None,
            typedefs_file: None,
            timeout_seconds: 30,
        }
    }
}

/// Inheritance resolution configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Universal base every generated model object extends
    pub root_type: String,
    /// Cap on de-duplication passes; `0` means one pass per type plus one
    pub max_passes: usize,
    /// Whether the built-in override table is applied
    pub use_default_overrides: bool,
    /// Additional `type -> supertype` overrides; these win over the built-in table
    pub overrides: IndexMap<String, String>,
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            root_type: DEFAULT_ROOT_TYPE.to_string(),
            max_passes: 0,
            use_default_overrides: true,
            overrides: IndexMap::new(),
        }
    }
}

/// Generator output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Java package of the generated model classes
    pub java_package: String,
    /// Output directory for Java sources
    pub java_output_dir: String,
    /// Output directory for Markdown docs
    pub docs_output_dir: String,
    /// Whether to emit Javadoc / descriptions
    pub include_docs: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            java_package: "com.atlan.model".to_string(),
            java_output_dir: "generated/java".to_string(),
            docs_output_dir: "generated/docs".to_string(),
            include_docs: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_var_substitution() {
        let content = "server: ${NONEXISTENT_TYPEGEN_VAR:-default_value}";
        let result = substitute_env_vars(content);
        assert_eq!(result, "server: default_value");

        let content = "${TYPEGEN_VAR1_UNSET:-val1} and ${TYPEGEN_VAR2_UNSET:-val2}";
        let result = substitute_env_vars(content);
        assert_eq!(result, "val1 and val2");
    }

    #[test]
    fn test_defaults() {
        let config = TypegenConfig::default();
        assert_eq!(config.resolution.root_type, DEFAULT_ROOT_TYPE);
        assert_eq!(config.source.timeout_seconds, 30);
        assert!(config.generator.include_docs);
        assert!(config.validate().is_ok());
    }
}
