//! Connection configuration

use super::{HttpConfig, SyncConfig};
use crate::core::UserMatchKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use tracing::warn;

/// Settings for reaching an OpenSearch cluster and shaping the graph
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorConfig {
    /// Base URL of the cluster, e.g. `https://search.internal:9200`
    pub address: String,
    pub username: String,
    /// Never written back out
    #[serde(skip_serializing)]
    pub password: String,
    /// Key used to match role-mapping users against the identity system
    pub user_match_key: UserMatchKey,
    /// Disable TLS certificate verification
    pub insecure_skip_verify: bool,
    /// PEM file holding the CA used to verify the cluster
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert_path: Option<PathBuf>,
    /// Inline PEM CA, mutually exclusive with `ca_cert_path`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<String>,
    /// Resolve mapped users that exist as internal users to the user resource
    pub match_internal_users: bool,
    pub http: HttpConfig,
    pub sync: SyncConfig,
}

impl fmt::Debug for ConnectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorConfig")
            .field("address", &self.address)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_match_key", &self.user_match_key)
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("ca_cert_path", &self.ca_cert_path)
            .field("ca_cert", &self.ca_cert.as_ref().map(|_| "<pem>"))
            .field("match_internal_users", &self.match_internal_users)
            .field("http", &self.http)
            .field("sync", &self.sync)
            .finish()
    }
}

impl ConnectorConfig {
    /// Whether a custom CA is configured
    pub fn has_custom_ca(&self) -> bool {
        self.ca_cert_path.is_some() || self.ca_cert.is_some()
    }
}

/// Emit warnings for settings that are valid but unsafe or ignored
pub(crate) fn warn_insecure_config(config: &ConnectorConfig) {
    if config.insecure_skip_verify {
        warn!("TLS certificate verification is disabled");
        if config.has_custom_ca() {
            warn!("CA certificate is ignored because insecure_skip_verify is set");
        }
    }
    if config.address.starts_with("http://") {
        warn!("Connecting over plain HTTP; credentials are sent unencrypted");
    }
}
