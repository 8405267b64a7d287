//! Conversions from security API responses to ConnectorError

use super::types::{ConnectorError, RecordKind};

impl ConnectorError {
    /// Map a non-success HTTP status from the security API.
    ///
    /// `subject` names the record the request addressed, when it addressed one.
    pub fn from_status(status: u16, body: String, subject: Option<(RecordKind, &str)>) -> Self {
        match (status, subject) {
            (404, Some((kind, name))) => ConnectorError::not_found(kind, name),
            (401, _) => ConnectorError::Unauthorized("check credentials".to_string()),
            (429, _) => ConnectorError::RateLimit(body),
            _ => ConnectorError::Api { status, body },
        }
    }
}
