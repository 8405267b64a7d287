//! Error type definitions

use crate::core::SynthesisError;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Result type alias for the connector
pub type Result<T> = std::result::Result<T, ConnectorError>;

/// Kind of record fetched from the security API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Role,
    RoleMapping,
    User,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Role => write!(f, "role"),
            RecordKind::RoleMapping => write!(f, "role mapping"),
            RecordKind::User => write!(f, "user"),
        }
    }
}

/// Main error type for the connector
#[derive(Error, Debug)]
pub enum ConnectorError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// URL construction errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// A record requested by name does not exist
    #[error("{kind} not found: {name}")]
    NotFound { kind: RecordKind, name: String },

    /// Non-success response from the security API
    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// Credentials rejected by the security API
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limiting errors
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Synthesis engine errors
    #[error("Synthesis error: {0}")]
    Synthesis(#[from] SynthesisError),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
