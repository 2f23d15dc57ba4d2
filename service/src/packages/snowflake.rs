//! Snowflake crawler and miner packages

use super::builder::{PackageBuilder, keys};
use super::connection_delete::validate_connection_qualified_name;
use super::workflow::Workflow;
use atlan_core::asset::{AssetCore, AssetRecord, ConnectionAttributes};
use atlan_core::{Asset, AtlanConnectorType, AtlanError, Result};
use indexmap::IndexMap;
use serde_json::json;
use tracing::debug;

const CRAWLER_PREFIX: &str = "atlan-snowflake";
const CRAWLER_PACKAGE: &str = "@atlan/snowflake";
const MINER_PREFIX: &str = "atlan-snowflake-miner";
const MINER_PACKAGE: &str = "@atlan/snowflake-miner";
const ICON: &str = "https://assets.atlan.com/assets/snowflake.svg";

/// Database name to schema names, as given by the caller
pub type AssetFilter = IndexMap<String, Vec<String>>;

/// How the crawler authenticates
#[derive(Debug, Clone, PartialEq, Eq)]
enum Credential {
    Basic {
        username: String,
        password: String,
        role: String,
        warehouse: String,
    },
    KeyPair {
        username: String,
        private_key: String,
        private_key_password: String,
        role: String,
        warehouse: String,
    },
}

/// Where the crawler reads metadata from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum Extraction {
    #[default]
    InformationSchema,
    AccountUsage {
        database: String,
        schema: String,
    },
}

/// Crawls Snowflake metadata into a new connection
#[derive(Debug, Clone)]
pub struct SnowflakeCrawler {
    connection_name: String,
    admin_roles: Vec<String>,
    admin_users: Vec<String>,
    admin_groups: Vec<String>,
    epoch: Option<i64>,
    hostname: Option<String>,
    credential: Option<Credential>,
    extraction: Extraction,
    include: AssetFilter,
    exclude: AssetFilter,
    lineage: bool,
    tags: bool,
}

impl SnowflakeCrawler {
    /// Start a crawler for a new connection
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::InvalidRequest` if the name is blank or no
    /// connection admin (role, user or group) is given.
    pub fn creator(
        connection_name: impl Into<String>,
        admin_roles: Vec<String>,
        admin_users: Vec<String>,
        admin_groups: Vec<String>,
    ) -> Result<Self> {
        let connection_name = connection_name.into();
        if connection_name.trim().is_empty() {
            return Err(AtlanError::invalid_request("connection name must not be empty"));
        }
        if admin_roles.is_empty() && admin_users.is_empty() && admin_groups.is_empty() {
            return Err(AtlanError::invalid_request(
                "a connection needs at least one admin role, user or group",
            ));
        }
        Ok(Self {
            connection_name,
            admin_roles,
            admin_users,
            admin_groups,
            epoch: None,
            hostname: None,
            credential: None,
            extraction: Extraction::default(),
            include: AssetFilter::new(),
            exclude: AssetFilter::new(),
            lineage: true,
            tags: false,
        })
    }

    /// Fix the run's epoch seconds
    #[must_use]
    pub fn with_epoch(mut self, epoch: i64) -> Self {
        self.epoch = Some(epoch);
        self
    }

    /// Snowflake account hostname, e.g. `abc123.snowflakecomputing.com`
    #[must_use]
    pub fn hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Authenticate with a username and password
    #[must_use]
    pub fn basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
        warehouse: impl Into<String>,
    ) -> Self {
        self.credential = Some(Credential::Basic {
            username: username.into(),
            password: password.into(),
            role: role.into(),
            warehouse: warehouse.into(),
        });
        self
    }

    /// Authenticate with a key pair
    #[must_use]
    pub fn key_pair_auth(
        mut self,
        username: impl Into<String>,
        private_key: impl Into<String>,
        private_key_password: impl Into<String>,
        role: impl Into<String>,
        warehouse: impl Into<String>,
    ) -> Self {
        self.credential = Some(Credential::KeyPair {
            username: username.into(),
            private_key: private_key.into(),
            private_key_password: private_key_password.into(),
            role: role.into(),
            warehouse: warehouse.into(),
        });
        self
    }

    /// Read metadata from `INFORMATION_SCHEMA` (the default)
    #[must_use]
    pub fn information_schema(mut self) -> Self {
        self.extraction = Extraction::InformationSchema;
        self
    }

    /// Read metadata from an account usage schema
    #[must_use]
    pub fn account_usage(mut self, database: impl Into<String>, schema: impl Into<String>) -> Self {
        self.extraction = Extraction::AccountUsage {
            database: database.into(),
            schema: schema.into(),
        };
        self
    }

    /// Only crawl these databases and schemas
    #[must_use]
    pub fn include(mut self, filter: AssetFilter) -> Self {
        self.include = filter;
        self
    }

    /// Skip these databases and schemas
    #[must_use]
    pub fn exclude(mut self, filter: AssetFilter) -> Self {
        self.exclude = filter;
        self
    }

    /// Whether to extract lineage
    #[must_use]
    pub fn lineage(mut self, enabled: bool) -> Self {
        self.lineage = enabled;
        self
    }

    /// Whether to extract Snowflake tags
    #[must_use]
    pub fn tags(mut self, enabled: bool) -> Self {
        self.tags = enabled;
        self
    }

    /// Connection asset the crawl creates
    fn connection(&self, epoch: i64) -> Asset {
        let connector = AtlanConnectorType::Snowflake;
        Asset::Connection(AssetRecord {
            guid: None,
            status: None,
            attributes: ConnectionAttributes {
                core: AssetCore {
                    qualified_name: Some(connector.connection_qualified_name(epoch)),
                    name: Some(self.connection_name.clone()),
                    ..AssetCore::default()
                },
                connector_name: Some(connector.value().to_string()),
                category: Some(connector.category().value().to_string()),
                admin_roles: self.admin_roles.clone(),
                admin_users: self.admin_users.clone(),
                admin_groups: self.admin_groups.clone(),
                allow_query: Some(true),
                allow_query_preview: Some(true),
            },
        })
    }

    /// Render the workflow document
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::InvalidRequest` if no hostname or credential was
    /// set, or a serialization error if a filter cannot be encoded.
    pub fn to_workflow(&self) -> Result<Workflow> {
        let hostname = self
            .hostname
            .as_deref()
            .ok_or_else(|| AtlanError::invalid_request("a Snowflake hostname is required"))?;
        let credential = self
            .credential
            .as_ref()
            .ok_or_else(|| AtlanError::invalid_request("Snowflake credentials are required"))?;

        let mut builder = PackageBuilder::new(CRAWLER_PREFIX, CRAWLER_PACKAGE);
        if let Some(epoch) = self.epoch {
            builder = builder.with_epoch(epoch);
        }
        let epoch = builder.epoch();
        let connection = self.connection(epoch);
        let connection_qualified_name = AtlanConnectorType::Snowflake.connection_qualified_name(epoch);
        let credential_name = format!("{}-0", connection_qualified_name.replace('/', "-"));

        builder
            .add_label(keys::CERTIFIED, "true")
            .add_label(keys::SOURCE, "snowflake")
            .add_label(keys::SOURCE_CATEGORY, "warehouse")
            .add_label(keys::TYPE, "connector")
            .add_label(keys::VERIFIED, "true")
            .add_label(keys::ATLAN_UI, "true")
            .add_label(
                format!("orchestration.atlan.com/default-snowflake-{epoch}"),
                "true",
            )
            .add_annotation(keys::ALLOW_SCHEDULE, "true")
            .add_annotation(keys::CATEGORIES, "warehouse,crawler")
            .add_annotation(
                keys::DOCS_URL,
                "https://ask.atlan.com/hc/en-us/articles/6037440864145",
            )
            .add_annotation(keys::EMOJI, "\u{1f680}")
            .add_annotation(keys::ICON, ICON)
            .add_annotation(keys::LOGO, ICON)
            .add_annotation(keys::NAME, "Snowflake Assets")
            .add_annotation(
                keys::PACKAGE_DESCRIPTION,
                "Package to crawl snowflake assets and publish to Atlan for discovery",
            )
            .add_annotation(
                keys::PACKAGE_KEYWORDS,
                r#"["snowflake","warehouse","connector","crawler"]"#,
            )
            .add_annotation(
                keys::ATLAN_NAME,
                format!("{CRAWLER_PREFIX}-default-snowflake-{epoch}"),
            );

        builder
            .add_parameter("credential-guid", "{{credentialGuid}}")
            .add_parameter("connection", serde_json::to_string(&connection)?)
            .add_parameter("publish-mode", "production")
            .add_parameter("atlas-auth-type", "internal")
            .add_parameter("control-config-strategy", "default")
            .add_parameter("include-filter", encode_filter(&self.include)?)
            .add_parameter("exclude-filter", encode_filter(&self.exclude)?)
            .add_parameter("enable-lineage", self.lineage.to_string())
            .add_parameter("enable-snowflake-tag", self.tags.to_string());
        match &self.extraction {
            Extraction::InformationSchema => {
                builder.add_parameter("extraction-method", "default");
            }
            Extraction::AccountUsage { database, schema } => {
                builder
                    .add_parameter("extraction-method", "account-usage")
                    .add_parameter("account-usage-database-name", database.as_str())
                    .add_parameter("account-usage-schema-name", schema.as_str());
            }
        }

        let (auth_type, username, secret, extra) = match credential {
            Credential::Basic {
                username,
                password,
                role,
                warehouse,
            } => (
                "basic",
                username,
                password,
                json!({"role": role, "warehouse": warehouse}),
            ),
            Credential::KeyPair {
                username,
                private_key,
                private_key_password,
                role,
                warehouse,
            } => (
                "keypair",
                username,
                private_key,
                json!({
                    "role": role,
                    "warehouse": warehouse,
                    "private_key_password": private_key_password,
                }),
            ),
        };
        builder.add_payload(
            "credentialGuid",
            "credential",
            json!({
                "name": credential_name,
                "host": hostname,
                "port": 443,
                "authType": auth_type,
                "username": username,
                "password": secret,
                "extra": extra,
                "connectorConfigName": "atlan-connectors-snowflake",
            }),
        );

        debug!(
            connection = %connection_qualified_name,
            auth_type,
            "built Snowflake crawler package"
        );
        Ok(builder.to_workflow())
    }
}

/// Where the miner reads query history from
#[derive(Debug, Clone, PartialEq, Eq)]
enum MinerSource {
    Direct {
        start_epoch: i64,
        database: Option<String>,
        schema: Option<String>,
    },
    S3 {
        bucket: String,
        prefix: String,
        sql_query_key: String,
        default_database_key: String,
        default_schema_key: String,
        session_id_key: String,
    },
}

/// Mines query history of an existing Snowflake connection for lineage and usage
#[derive(Debug, Clone)]
pub struct SnowflakeMiner {
    connection_qualified_name: String,
    epoch: Option<i64>,
    source: Option<MinerSource>,
    native_lineage: bool,
}

impl SnowflakeMiner {
    /// Start a miner for the connection `connection_qualified_name`
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::InvalidRequest` if the qualified name is malformed
    /// or names a connector other than Snowflake.
    pub fn creator(connection_qualified_name: impl Into<String>) -> Result<Self> {
        let connection_qualified_name = connection_qualified_name.into();
        let connector = validate_connection_qualified_name(&connection_qualified_name)?;
        if connector != AtlanConnectorType::Snowflake {
            return Err(AtlanError::invalid_request(format!(
                "'{connection_qualified_name}' is a {connector} connection, not a Snowflake one"
            )));
        }
        Ok(Self {
            connection_qualified_name,
            epoch: None,
            source: None,
            native_lineage: false,
        })
    }

    /// Fix the run's epoch seconds
    #[must_use]
    pub fn with_epoch(mut self, epoch: i64) -> Self {
        self.epoch = Some(epoch);
        self
    }

    /// Mine directly from Snowflake, starting at `start_epoch`
    ///
    /// `database` and `schema` name a copy of the account usage views;
    /// `None` uses the default `SNOWFLAKE.ACCOUNT_USAGE`.
    #[must_use]
    pub fn direct(mut self, start_epoch: i64, database: Option<String>, schema: Option<String>) -> Self {
        self.source = Some(MinerSource::Direct {
            start_epoch,
            database,
            schema,
        });
        self
    }

    /// Mine query history files exported to S3
    #[must_use]
    pub fn s3(
        mut self,
        bucket: impl Into<String>,
        prefix: impl Into<String>,
        sql_query_key: impl Into<String>,
        default_database_key: impl Into<String>,
        default_schema_key: impl Into<String>,
        session_id_key: impl Into<String>,
    ) -> Self {
        self.source = Some(MinerSource::S3 {
            bucket: bucket.into(),
            prefix: prefix.into(),
            sql_query_key: sql_query_key.into(),
            default_database_key: default_database_key.into(),
            default_schema_key: default_schema_key.into(),
            session_id_key: session_id_key.into(),
        });
        self
    }

    /// Whether to use Snowflake's native lineage views
    #[must_use]
    pub fn native_lineage(mut self, enabled: bool) -> Self {
        self.native_lineage = enabled;
        self
    }

    /// Render the workflow document
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::InvalidRequest` if neither `direct` nor `s3` was chosen.
    pub fn to_workflow(&self) -> Result<Workflow> {
        let source = self.source.as_ref().ok_or_else(|| {
            AtlanError::invalid_request("choose a direct or S3 extraction for the miner")
        })?;

        let mut builder = PackageBuilder::new(MINER_PREFIX, MINER_PACKAGE);
        if let Some(epoch) = self.epoch {
            builder = builder.with_epoch(epoch);
        }
        let epoch = builder.epoch();

        builder
            .add_label(keys::CERTIFIED, "true")
            .add_label(keys::SOURCE, "snowflake")
            .add_label(keys::SOURCE_CATEGORY, "warehouse")
            .add_label(keys::TYPE, "miner")
            .add_label(keys::VERIFIED, "true")
            .add_label(
                format!(
                    "orchestration.atlan.com/{}",
                    self.connection_qualified_name.replace('/', "-")
                ),
                "true",
            )
            .add_annotation(keys::ALLOW_SCHEDULE, "true")
            .add_annotation(keys::CATEGORIES, "warehouse,miner")
            .add_annotation(
                keys::DOCS_URL,
                "https://ask.atlan.com/hc/en-us/articles/6482067592337",
            )
            .add_annotation(keys::EMOJI, "\u{1f680}")
            .add_annotation(keys::ICON, ICON)
            .add_annotation(keys::LOGO, ICON)
            .add_annotation(keys::NAME, "Snowflake Miner")
            .add_annotation(
                keys::PACKAGE_DESCRIPTION,
                "Package to mine query history data from Snowflake and store it for further processing",
            )
            .add_annotation(
                keys::PACKAGE_KEYWORDS,
                r#"["snowflake","warehouse","connector","miner"]"#,
            )
            .add_annotation(keys::ATLAN_NAME, format!("{MINER_PREFIX}-{epoch}"));

        builder
            .add_parameter("connection-qualified-name", self.connection_qualified_name.as_str())
            .add_parameter("single-session", "false")
            .add_parameter("native-lineage-active", self.native_lineage.to_string());
        match source {
            MinerSource::Direct {
                start_epoch,
                database,
                schema,
            } => {
                builder
                    .add_parameter("extraction-method", "query_history")
                    .add_parameter("miner-start-time-epoch", start_epoch.to_string());
                if let (Some(database), Some(schema)) = (database, schema) {
                    builder
                        .add_parameter("snowflake-database", "custom")
                        .add_parameter("database-name", database.as_str())
                        .add_parameter("schema-name", schema.as_str());
                } else {
                    builder.add_parameter("snowflake-database", "default");
                }
            }
            MinerSource::S3 {
                bucket,
                prefix,
                sql_query_key,
                default_database_key,
                default_schema_key,
                session_id_key,
            } => {
                builder
                    .add_parameter("extraction-method", "s3")
                    .add_parameter("extraction-s3-bucket", bucket.as_str())
                    .add_parameter("extraction-s3-prefix", prefix.as_str())
                    .add_parameter("sql-json-key", sql_query_key.as_str())
                    .add_parameter("catalog-json-key", default_database_key.as_str())
                    .add_parameter("schema-json-key", default_schema_key.as_str())
                    .add_parameter("session-json-key", session_id_key.as_str());
            }
        }

        debug!(
            connection = %self.connection_qualified_name,
            "built Snowflake miner package"
        );
        Ok(builder.to_workflow())
    }
}

/// Encode a filter as the JSON map of anchored regexes the crawler expects
///
/// # Errors
///
/// Returns a serialization error if the map cannot be encoded.
pub fn encode_filter(filter: &AssetFilter) -> Result<String> {
    let anchored: IndexMap<String, Vec<String>> = filter
        .iter()
        .map(|(database, schemas)| {
            (
                format!("^{database}$"),
                schemas.iter().map(|schema| format!("^{schema}$")).collect(),
            )
        })
        .collect();
    serde_json::to_string(&anchored).map_err(|e| AtlanError::serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_encoding() {
        let mut filter = AssetFilter::new();
        filter.insert("ANALYTICS".to_string(), vec!["WIDE_WORLD_IMPORTERS".to_string()]);
        filter.insert("RAW".to_string(), Vec::new());
        assert_eq!(
            encode_filter(&filter).unwrap(),
            r#"{"^ANALYTICS$":["^WIDE_WORLD_IMPORTERS$"],"^RAW$":[]}"#
        );
        assert_eq!(encode_filter(&AssetFilter::new()).unwrap(), "{}");
    }

    #[test]
    fn test_miner_requires_snowflake_connection() {
        let err = SnowflakeMiner::creator("default/tableau/1700000000").unwrap_err();
        assert!(matches!(err, AtlanError::InvalidRequest(_)));
    }
}
