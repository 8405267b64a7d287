//! CA certificate loading

use crate::config::ConnectorConfig;
use crate::config::validation::PEM_CERTIFICATE_MARKER;
use crate::utils::error::{ConnectorError, Result};
use reqwest::Certificate;
use tracing::debug;

/// Load the configured CA certificate, if any.
///
/// Returns `None` when no CA is configured or verification is disabled.
pub(crate) fn load_ca_certificate(config: &ConnectorConfig) -> Result<Option<Certificate>> {
    if config.insecure_skip_verify {
        return Ok(None);
    }

    let pem = match (&config.ca_cert_path, &config.ca_cert) {
        (Some(path), _) => {
            debug!(path = %path.display(), "Loading CA certificate from file");
            std::fs::read(path).map_err(|e| {
                ConnectorError::Config(format!(
                    "Failed to read CA certificate {}: {}",
                    path.display(),
                    e
                ))
            })?
        }
        (None, Some(inline)) => inline.as_bytes().to_vec(),
        (None, None) => return Ok(None),
    };

    parse_pem(&pem).map(Some)
}

fn parse_pem(pem: &[u8]) -> Result<Certificate> {
    if !String::from_utf8_lossy(pem).contains(PEM_CERTIFICATE_MARKER) {
        return Err(ConnectorError::Config(
            "CA certificate is not PEM encoded".to_string(),
        ));
    }
    Certificate::from_pem(pem)
        .map_err(|e| ConnectorError::Config(format!("Invalid CA certificate: {}", e)))
}
