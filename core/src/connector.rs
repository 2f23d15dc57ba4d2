//! Connector types and the categories they belong to

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AtlanError;

/// Broad family a connector falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConnectorCategory {
    Warehouse,
    Database,
    Bi,
    Elt,
    Lake,
    Observability,
    EventBus,
}

impl ConnectorCategory {
    /// Value used in connection payloads
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::Warehouse => "warehouse",
            Self::Database => "database",
            Self::Bi => "bi",
            Self::Elt => "elt",
            Self::Lake => "lake",
            Self::Observability => "observability",
            Self::EventBus => "eventbus",
        }
    }
}

/// Source systems a connection can point at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AtlanConnectorType {
    Snowflake,
    Databricks,
    Bigquery,
    Redshift,
    Postgres,
    Mysql,
    Oracle,
    Tableau,
    PowerBi,
    Looker,
    Dbt,
    Fivetran,
    S3,
    MonteCarlo,
    Kafka,
}

impl AtlanConnectorType {
    /// Identifier used inside qualified names and package parameters
    #[must_use]
    pub fn value(self) -> &'static str {
        match self {
            Self::Snowflake => "snowflake",
            Self::Databricks => "databricks",
            Self::Bigquery => "bigquery",
            Self::Redshift => "redshift",
            Self::Postgres => "postgres",
            Self::Mysql => "mysql",
            Self::Oracle => "oracle",
            Self::Tableau => "tableau",
            Self::PowerBi => "powerbi",
            Self::Looker => "looker",
            Self::Dbt => "dbt",
            Self::Fivetran => "fivetran",
            Self::S3 => "s3",
            Self::MonteCarlo => "mc",
            Self::Kafka => "kafka",
        }
    }

    /// Category of the connector
    #[must_use]
    pub fn category(self) -> ConnectorCategory {
        match self {
            Self::Snowflake | Self::Databricks | Self::Bigquery | Self::Redshift => {
                ConnectorCategory::Warehouse
            }
            Self::Postgres | Self::Mysql | Self::Oracle => ConnectorCategory::Database,
            Self::Tableau | Self::PowerBi | Self::Looker => ConnectorCategory::Bi,
            Self::Dbt | Self::Fivetran => ConnectorCategory::Elt,
            Self::S3 => ConnectorCategory::Lake,
            Self::MonteCarlo => ConnectorCategory::Observability,
            Self::Kafka => ConnectorCategory::EventBus,
        }
    }

    /// Qualified name for a connection created at `epoch` seconds
    #[must_use]
    pub fn connection_qualified_name(self, epoch: i64) -> String {
        format!("default/{}/{epoch}", self.value())
    }

    /// Connector named in a connection qualified name (`default/<connector>/<epoch>`)
    #[must_use]
    pub fn from_qualified_name(qualified_name: &str) -> Option<Self> {
        let mut tokens = qualified_name.split('/');
        match (tokens.next(), tokens.next()) {
            (Some("default"), Some(connector)) => connector.parse().ok(),
            _ => None,
        }
    }

    const ALL: [Self; 15] = [
        Self::Snowflake,
        Self::Databricks,
        Self::Bigquery,
        Self::Redshift,
        Self::Postgres,
        Self::Mysql,
        Self::Oracle,
        Self::Tableau,
        Self::PowerBi,
        Self::Looker,
        Self::Dbt,
        Self::Fivetran,
        Self::S3,
        Self::MonteCarlo,
        Self::Kafka,
    ];
}

impl fmt::Display for AtlanConnectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for AtlanConnectorType {
    type Err = AtlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.value() == s)
            .ok_or_else(|| AtlanError::invalid_request(format!("unknown connector type '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_roundtrip() {
        let qn = AtlanConnectorType::Snowflake.connection_qualified_name(1_700_000_000);
        assert_eq!(qn, "default/snowflake/1700000000");
        assert_eq!(
            AtlanConnectorType::from_qualified_name(&qn),
            Some(AtlanConnectorType::Snowflake)
        );
        assert_eq!(AtlanConnectorType::from_qualified_name("snowflake/123"), None);
        assert_eq!(AtlanConnectorType::from_qualified_name("default/nope/1"), None);
    }

    #[test]
    fn test_categories() {
        assert_eq!(AtlanConnectorType::Snowflake.category().value(), "warehouse");
        assert_eq!(AtlanConnectorType::MonteCarlo.to_string(), "mc");
        assert!("tableau".parse::<AtlanConnectorType>().is_ok());
    }
}
