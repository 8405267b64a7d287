//! Configuration loading utilities
//!
//! Environment variables and command-line flags are both expressed as a set
//! of optional overrides layered on top of the file configuration.

use super::models::ConnectorConfig;
use crate::core::UserMatchKey;
use crate::utils::error::{ConnectorError, Result};
use std::env;
use std::path::PathBuf;
use tracing::debug;

pub const ENV_ADDRESS: &str = "OPENSEARCH_ADDRESS";
pub const ENV_USERNAME: &str = "OPENSEARCH_USERNAME";
pub const ENV_PASSWORD: &str = "OPENSEARCH_PASSWORD";
pub const ENV_USER_MATCH_KEY: &str = "OPENSEARCH_USER_MATCH_KEY";
pub const ENV_INSECURE_SKIP_VERIFY: &str = "OPENSEARCH_INSECURE_SKIP_VERIFY";
pub const ENV_CA_CERT_PATH: &str = "OPENSEARCH_CA_CERT_PATH";
pub const ENV_CA_CERT: &str = "OPENSEARCH_CA_CERT";
pub const ENV_MATCH_INTERNAL_USERS: &str = "OPENSEARCH_MATCH_INTERNAL_USERS";
pub const ENV_SYNC_CONCURRENCY: &str = "OPENSEARCH_SYNC_CONCURRENCY";

/// Optional values that replace file configuration when set
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub address: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub user_match_key: Option<UserMatchKey>,
    pub insecure_skip_verify: Option<bool>,
    pub ca_cert_path: Option<PathBuf>,
    pub ca_cert: Option<String>,
    pub match_internal_users: Option<bool>,
    pub concurrency: Option<usize>,
}

impl ConfigOverrides {
    /// Read overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read overrides through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let overrides = Self {
            address: get(ENV_ADDRESS),
            username: get(ENV_USERNAME),
            password: get(ENV_PASSWORD),
            user_match_key: get(ENV_USER_MATCH_KEY)
                .map(|v| v.parse::<UserMatchKey>())
                .transpose()
                .map_err(|e| ConnectorError::Config(format!("{}: {}", ENV_USER_MATCH_KEY, e)))?,
            insecure_skip_verify: get(ENV_INSECURE_SKIP_VERIFY)
                .map(|v| parse_bool(ENV_INSECURE_SKIP_VERIFY, &v))
                .transpose()?,
            ca_cert_path: get(ENV_CA_CERT_PATH).map(PathBuf::from),
            ca_cert: get(ENV_CA_CERT),
            match_internal_users: get(ENV_MATCH_INTERNAL_USERS)
                .map(|v| parse_bool(ENV_MATCH_INTERNAL_USERS, &v))
                .transpose()?,
            concurrency: get(ENV_SYNC_CONCURRENCY)
                .map(|v| {
                    v.trim().parse::<usize>().map_err(|e| {
                        ConnectorError::Config(format!("Invalid {}: {}", ENV_SYNC_CONCURRENCY, e))
                    })
                })
                .transpose()?,
        };

        debug!("Configuration overrides loaded from environment variables");
        Ok(overrides)
    }

    /// Combine two override sets; values in `other` win
    pub fn merge(self, other: Self) -> Self {
        Self {
            address: other.address.or(self.address),
            username: other.username.or(self.username),
            password: other.password.or(self.password),
            user_match_key: other.user_match_key.or(self.user_match_key),
            insecure_skip_verify: other.insecure_skip_verify.or(self.insecure_skip_verify),
            ca_cert_path: other.ca_cert_path.or(self.ca_cert_path),
            ca_cert: other.ca_cert.or(self.ca_cert),
            match_internal_users: other.match_internal_users.or(self.match_internal_users),
            concurrency: other.concurrency.or(self.concurrency),
        }
    }

    pub(crate) fn apply_to(self, config: &mut ConnectorConfig) {
        if let Some(address) = self.address {
            config.address = address;
        }
        if let Some(username) = self.username {
            config.username = username;
        }
        if let Some(password) = self.password {
            config.password = password;
        }
        if let Some(key) = self.user_match_key {
            config.user_match_key = key;
        }
        if let Some(insecure) = self.insecure_skip_verify {
            config.insecure_skip_verify = insecure;
        }
        if let Some(path) = self.ca_cert_path {
            config.ca_cert_path = Some(path);
        }
        if let Some(cert) = self.ca_cert {
            config.ca_cert = Some(cert);
        }
        if let Some(enabled) = self.match_internal_users {
            config.match_internal_users = enabled;
        }
        if let Some(concurrency) = self.concurrency {
            config.sync.concurrency = concurrency;
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConnectorError::Config(format!(
            "Invalid {}: expected a boolean, got '{}'",
            key, other
        ))),
    }
}
