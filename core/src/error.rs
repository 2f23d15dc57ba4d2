//! Error types for Atlan model operations

use thiserror::Error;

/// Main error type for Atlan model operations
#[derive(Error, Debug)]
pub enum AtlanError {
    /// The type definition source could not be read or returned unusable data
    #[error("Type definition source failed: {message}")]
    SourceError {
        /// Error message
        message: String,
        /// Source location (file path or URL) if available
        location: Option<String>,
    },

    /// Types whose single supertype never resolved (cycles, unknown references)
    #[error("Unresolved types: {}", types.join(", "))]
    UnresolvedTypes {
        /// Names of the types left on the worklist, sorted
        types: Vec<String>,
    },

    /// A JSON document could not be turned into a typed value
    #[error("Failed to deserialize{}: {message}", type_name.as_ref().map(|t| format!(" '{t}'")).unwrap_or_default())]
    DeserializationError {
        /// Error message
        message: String,
        /// Discriminator value involved, if any
        type_name: Option<String>,
    },

    /// A request or package configuration is missing required values
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Code or documentation generation failed
    #[error("Generation error: {0}")]
    GenerationError(String),

    /// IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Atlan model operations
pub type Result<T> = std::result::Result<T, AtlanError>;

impl AtlanError {
    /// Create a new source error
    #[must_use]
    pub fn source_error(message: impl Into<String>) -> Self {
        Self::SourceError {
            message: message.into(),
            location: None,
        }
    }

    /// Create a new source error with the file path or URL that failed
    #[must_use]
    pub fn source_error_at(message: impl Into<String>, location: impl Into<String>) -> Self {
        Self::SourceError {
            message: message.into(),
            location: Some(location.into()),
        }
    }

    /// Create an unresolved-types error; names are sorted for stable output
    #[must_use]
    pub fn unresolved(types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut types: Vec<String> = types.into_iter().map(Into::into).collect();
        types.sort();
        types.dedup();
        Self::UnresolvedTypes { types }
    }

    /// Create a deserialization error
    #[must_use]
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::DeserializationError {
            message: message.into(),
            type_name: None,
        }
    }

    /// Create a deserialization error naming the offending discriminator
    #[must_use]
    pub fn unknown_type_name(type_name: impl Into<String>) -> Self {
        let type_name = type_name.into();
        Self::DeserializationError {
            message: format!("unrecognized typeName '{type_name}'"),
            type_name: Some(type_name),
        }
    }

    /// Create an invalid request error
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a new configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Create a generation error
    #[must_use]
    pub fn generation(message: impl Into<String>) -> Self {
        Self::GenerationError(message.into())
    }

    /// Create a serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError(message.into())
    }

    /// Create a generic error
    #[must_use]
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

impl From<serde_json::Error> for AtlanError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for AtlanError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
