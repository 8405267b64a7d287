//! Helper functions for creating and classifying errors

use super::types::{ConnectorError, RecordKind};

/// Helper functions for creating specific errors
impl ConnectorError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn not_found<S: Into<String>>(kind: RecordKind, name: S) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn rate_limit<S: Into<String>>(message: S) -> Self {
        Self::RateLimit(message.into())
    }

    /// Whether this is a not-found outcome for the given record kind
    pub fn is_not_found(&self, expected: RecordKind) -> bool {
        matches!(self, Self::NotFound { kind, .. } if *kind == expected)
    }

    /// Whether the request that produced this error may succeed when repeated
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimit(_) => true,
            Self::Api { status, .. } => matches!(status, 502..=504),
            Self::HttpClient(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => false,
        }
    }

    /// Stable machine-readable code used in sync reports
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::HttpClient(_) => "transport_error",
            Self::Serialization(_) | Self::Yaml(_) => "decode_error",
            Self::Io(_) => "io_error",
            Self::Url(_) => "url_error",
            Self::NotFound { .. } => "not_found",
            Self::Api { .. } => "api_error",
            Self::Unauthorized(_) => "unauthorized",
            Self::RateLimit(_) => "rate_limited",
            Self::Synthesis(_) => "synthesis_error",
            Self::Internal(_) => "internal_error",
        }
    }
}
