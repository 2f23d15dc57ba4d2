//! Connection delete utility package

use super::builder::{PackageBuilder, keys};
use super::workflow::Workflow;
use atlan_core::{AtlanConnectorType, AtlanError, Result};
use tracing::debug;

const PREFIX: &str = "atlan-connection-delete";
const PACKAGE_NAME: &str = "@atlan/connection-delete";

/// Removes a connection and every asset within it
#[derive(Debug, Clone)]
pub struct ConnectionDelete {
    builder: PackageBuilder,
}

impl ConnectionDelete {
    /// Build a delete run for the connection `qualified_name`
    ///
    /// `purge` removes the assets permanently; otherwise they are archived.
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::InvalidRequest` unless `qualified_name` has the
    /// form `default/<connector>/<epoch>`.
    pub fn creator(qualified_name: &str, purge: bool) -> Result<Self> {
        validate_connection_qualified_name(qualified_name)?;

        let mut builder = PackageBuilder::new(PREFIX, PACKAGE_NAME);
        builder
            .add_label(keys::CERTIFIED, "true")
            .add_label(keys::PREVIEW, "true")
            .add_label(keys::SOURCE, "atlan")
            .add_label(keys::SOURCE_CATEGORY, "utility")
            .add_label(keys::TYPE, "utility")
            .add_label(keys::VERIFIED, "true")
            .add_annotation(keys::ALLOW_SCHEDULE, "false")
            .add_annotation(keys::CATEGORIES, "utility,admin,connection,delete")
            .add_annotation(
                keys::DOCS_URL,
                "https://ask.atlan.com/hc/en-us/articles/6755306791697",
            )
            .add_annotation(keys::EMOJI, "\u{1f5d1}")
            .add_annotation(keys::NAME, "Connection Delete")
            .add_annotation(
                keys::PACKAGE_DESCRIPTION,
                "Deletes a connection and all its related assets",
            )
            .add_annotation(
                keys::PACKAGE_KEYWORDS,
                r#"["kotlin","utility","connection","delete"]"#,
            )
            .add_parameter("connection-qualified-name", qualified_name)
            .add_parameter("delete-assets", "true")
            .add_parameter("delete-type", if purge { "PURGE" } else { "SOFT" });

        debug!(qualified_name, purge, "built connection delete package");
        Ok(Self { builder })
    }

    /// Fix the run's epoch seconds
    #[must_use]
    pub fn with_epoch(mut self, epoch: i64) -> Self {
        self.builder = self.builder.with_epoch(epoch);
        self
    }

    /// The underlying builder
    #[must_use]
    pub fn builder(&self) -> &PackageBuilder {
        &self.builder
    }

    /// Render the workflow document
    #[must_use]
    pub fn to_workflow(&self) -> Workflow {
        self.builder.to_workflow()
    }
}

/// Check a connection qualified name is `default/<known connector>/<epoch>`
///
/// # Errors
///
/// Returns `AtlanError::InvalidRequest` describing what is wrong.
pub fn validate_connection_qualified_name(qualified_name: &str) -> Result<AtlanConnectorType> {
    let tokens: Vec<&str> = qualified_name.split('/').collect();
    let [tenant, connector, epoch] = tokens.as_slice() else {
        return Err(AtlanError::invalid_request(format!(
            "connection qualified name '{qualified_name}' must have the form default/<connector>/<epoch>"
        )));
    };
    if *tenant != "default" {
        return Err(AtlanError::invalid_request(format!(
            "connection qualified name '{qualified_name}' must start with 'default/'"
        )));
    }
    if epoch.is_empty() || !epoch.chars().all(|c| c.is_ascii_digit()) {
        return Err(AtlanError::invalid_request(format!(
            "connection qualified name '{qualified_name}' must end with a numeric epoch"
        )));
    }
    connector.parse::<AtlanConnectorType>().map_err(|_| {
        AtlanError::invalid_request(format!(
            "unknown connector '{connector}' in connection qualified name '{qualified_name}'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_validation() {
        assert_eq!(
            validate_connection_qualified_name("default/snowflake/1700000000").unwrap(),
            AtlanConnectorType::Snowflake
        );
        for bad in [
            "",
            "default/snowflake",
            "tenant/snowflake/1700000000",
            "default/snowflake/abc",
            "default/nosuchthing/1700000000",
            "default/snowflake/1700000000/extra",
        ] {
            let err = validate_connection_qualified_name(bad).unwrap_err();
            assert!(matches!(err, AtlanError::InvalidRequest(_)), "{bad}");
        }
    }
}
