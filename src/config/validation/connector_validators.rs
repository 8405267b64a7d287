//! Connector configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;
use url::Url;

pub(crate) const PEM_CERTIFICATE_MARKER: &str = "-----BEGIN CERTIFICATE-----";

const MAX_CONCURRENCY: usize = 256;

impl Validate for ConnectorConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating connector configuration");

        if self.address.trim().is_empty() {
            return Err("address is required".to_string());
        }
        let url = Url::parse(&self.address)
            .map_err(|e| format!("Invalid address '{}': {}", self.address, e))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!(
                "Unsupported address scheme '{}': expected http or https",
                url.scheme()
            ));
        }
        if url.host_str().is_none() {
            return Err(format!("Address '{}' has no host", self.address));
        }

        if self.username.trim().is_empty() {
            return Err("username is required".to_string());
        }
        if self.password.is_empty() {
            return Err("password is required".to_string());
        }

        if self.ca_cert_path.is_some() && self.ca_cert.is_some() {
            return Err("ca_cert_path and ca_cert are mutually exclusive".to_string());
        }
        if !self.insecure_skip_verify {
            if let Some(pem) = &self.ca_cert {
                if !pem.contains(PEM_CERTIFICATE_MARKER) {
                    return Err("ca_cert does not contain a PEM certificate".to_string());
                }
            }
        }

        self.http.validate()?;
        self.sync.validate()?;

        Ok(())
    }
}

impl Validate for HttpConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_secs == 0 {
            return Err("HTTP timeout must be greater than 0".to_string());
        }
        if self.retry_base_delay_ms > self.retry_max_delay_ms {
            return Err("retry_base_delay_ms must not exceed retry_max_delay_ms".to_string());
        }
        if self.user_agent.trim().is_empty() {
            return Err("user_agent cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Validate for SyncConfig {
    fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("Sync concurrency must be greater than 0".to_string());
        }
        if self.concurrency > MAX_CONCURRENCY {
            return Err(format!(
                "Sync concurrency should not exceed {}",
                MAX_CONCURRENCY
            ));
        }
        Ok(())
    }
}
