//! Configuration value checks

use super::TypegenConfig;
use atlan_core::{AtlanError, Result};

/// Validate specific configuration values
///
/// # Errors
///
/// Returns an error if configuration values are invalid:
/// - The root type is empty
/// - The source timeout is zero
/// - An override maps a type to itself or to an empty name
/// - The Java package is empty
pub fn validate_values(config: &TypegenConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.resolution.root_type.trim().is_empty() {
        errors.push("resolution.root_type must not be empty".to_string());
    }

    if config.source.timeout_seconds == 0 {
        errors.push("source.timeout_seconds must be greater than 0".to_string());
    }

    for (type_name, supertype) in &config.resolution.overrides {
        if supertype.trim().is_empty() {
            errors.push(format!("resolution.overrides.{type_name} must not be empty"));
        } else if type_name == supertype {
            errors.push(format!(
                "resolution.overrides.{type_name} must not name the type itself"
            ));
        }
    }

    if config.generator.java_package.trim().is_empty() {
        errors.push("generator.java_package must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AtlanError::ConfigError(format!(
            "Configuration validation failed:\n{}",
            errors
                .iter()
                .map(|e| format!("- {e}"))
                .collect::<Vec<_>>()
                .join("\n")
        )))
    }
}
