//! Sources the type definition cache can be populated from

use crate::config::SourceConfig;
use async_trait::async_trait;
use atlan_core::prelude::*;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

/// Path of the typedef endpoint relative to the tenant URL
pub const TYPEDEFS_ENDPOINT: &str = "/api/meta/types/typedefs";

/// Somewhere complete type definitions can be read from
#[async_trait]
pub trait TypeDefSource: Send + Sync {
    /// Short description for log messages (path, URL, ...)
    fn describe(&self) -> String;

    /// Fetch every entity, struct and enum definition
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::SourceError` if the source is unreachable or
    /// its content cannot be parsed.
    async fn fetch(&self) -> Result<Vec<TypeDefinition>>;
}

/// Saved typedef response on disk
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Create a source reading the given file
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TypeDefSource for JsonFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Vec<TypeDefinition>> {
        let location = self.describe();
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AtlanError::source_error_at(e.to_string(), &location))?;
        let response: TypeDefResponse = serde_json::from_str(&contents).map_err(|e| {
            AtlanError::source_error_at(format!("malformed typedef response: {e}"), &location)
        })?;
        debug!(path = %location, "read typedef response from file");
        Ok(response.into_model_defs())
    }
}

/// Live tenant typedef endpoint
#[derive(Debug, Clone)]
pub struct AtlanApiSource {
    base_url: String,
    api_token: Option<String>,
    client: Client,
}

impl AtlanApiSource {
    /// Create a source for the tenant at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::ConfigError` if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AtlanError::config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into(),
            api_token: api_token.filter(|t| !t.is_empty()),
            client,
        })
    }

    /// Create a source from the `source` configuration section
    ///
    /// # Errors
    ///
    /// Returns `AtlanError::ConfigError` if no base URL is configured or the
    /// HTTP client cannot be built.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| AtlanError::config("source.base_url is required for the API source"))?;
        Self::new(
            base_url,
            config.api_token.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Full URL of the typedef endpoint
    #[must_use]
    pub fn typedefs_url(&self) -> String {
        format!("{}{TYPEDEFS_ENDPOINT}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl TypeDefSource for AtlanApiSource {
    fn describe(&self) -> String {
        self.typedefs_url()
    }

    async fn fetch(&self) -> Result<Vec<TypeDefinition>> {
        let url = self.typedefs_url();
        let mut request = self.client.get(&url);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AtlanError::source_error_at(e.to_string(), &url))?;
        let status = response.status();
        if !status.is_success() {
            return Err(AtlanError::source_error_at(
                format!("typedef request returned HTTP {status}"),
                &url,
            ));
        }

        let body: TypeDefResponse = response.json().await.map_err(|e| {
            AtlanError::source_error_at(format!("malformed typedef response: {e}"), &url)
        })?;
        debug!(url = %url, "fetched typedef response");
        Ok(body.into_model_defs())
    }
}

/// Fixed set of definitions held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    defs: Vec<TypeDefinition>,
}

impl InMemorySource {
    /// Create a source serving the given definitions
    #[must_use]
    pub fn new(defs: Vec<TypeDefinition>) -> Self {
        Self { defs }
    }
}

impl FromIterator<TypeDefinition> for InMemorySource {
    fn from_iter<I: IntoIterator<Item = TypeDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl TypeDefSource for InMemorySource {
    fn describe(&self) -> String {
        format!("in-memory ({} definitions)", self.defs.len())
    }

    async fn fetch(&self) -> Result<Vec<TypeDefinition>> {
        Ok(self.defs.clone())
    }
}
