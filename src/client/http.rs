//! REST client for the OpenSearch security API

use super::models::{Role, RoleMapping, User};
use super::tls::load_ca_certificate;
use super::PermissionSource;
use crate::config::ConnectorConfig;
use crate::utils::error::{ConnectorError, RecordKind, Result, RetryPolicy};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};
use url::Url;

/// Security API root on OpenSearch distributions
pub const SECURITY_API_PATH: &str = "/_plugins/_security/api";
/// Security API root on Open Distro clusters
pub const LEGACY_SECURITY_API_PATH: &str = "/_opendistro/_security/api";

const ROLES: &str = "roles";
const ROLES_MAPPING: &str = "rolesmapping";
const INTERNAL_USERS: &str = "internalusers";

/// Records that arrive keyed by name and carry the name after decoding
trait Named {
    fn set_name(&mut self, name: String);
}

impl Named for Role {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Named for RoleMapping {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

impl Named for User {
    fn set_name(&mut self, name: String) {
        self.username = name;
    }
}

#[derive(Debug, Default, Deserialize)]
struct RootInfo {
    #[serde(default)]
    version: VersionInfo,
}

#[derive(Debug, Default, Deserialize)]
struct VersionInfo {
    #[serde(default)]
    distribution: Option<String>,
}

/// OpenSearch security API client
#[derive(Debug, Clone)]
pub struct OpenSearchClient {
    http: Client,
    base_url: Url,
    username: String,
    password: String,
    api_path: String,
    retry: RetryPolicy,
}

impl OpenSearchClient {
    /// Build a client using the default security API path
    pub fn new(config: &ConnectorConfig) -> Result<Self> {
        let base_url = Url::parse(&config.address)?;
        if base_url.cannot_be_a_base() {
            return Err(ConnectorError::config(format!(
                "address '{}' cannot be used as a base URL",
                config.address
            )));
        }

        let mut builder = ClientBuilder::new()
            .use_rustls_tls()
            .timeout(config.http.timeout())
            .user_agent(config.http.user_agent.clone());

        if config.insecure_skip_verify {
            builder = builder.danger_accept_invalid_certs(true);
        } else if let Some(ca) = load_ca_certificate(config)? {
            builder = builder.tls_built_in_root_certs(false).add_root_certificate(ca);
        }

        let http = builder
            .build()
            .map_err(|e| ConnectorError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            username: config.username.clone(),
            password: config.password.clone(),
            api_path: SECURITY_API_PATH.to_string(),
            retry: RetryPolicy::new(config.http.retry_config()),
        })
    }

    /// Build a client and select the security API path the cluster serves
    pub async fn connect(config: &ConnectorConfig) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.api_path = client.detect_security_api_path().await.to_string();
        info!(address = %client.base_url, api_path = %client.api_path, "Connected to cluster");
        Ok(client)
    }

    /// Security API root currently in use
    pub fn api_path(&self) -> &str {
        &self.api_path
    }

    /// Ask the cluster which distribution it runs. Any failure keeps the
    /// default path.
    pub async fn detect_security_api_path(&self) -> &'static str {
        let url = self.base_url.clone();
        let info: Result<RootInfo> = self.get_json(url, None).await;

        match info {
            Ok(info) => match info.version.distribution {
                Some(d) if d.eq_ignore_ascii_case("opensearch") => SECURITY_API_PATH,
                _ => LEGACY_SECURITY_API_PATH,
            },
            Err(e) => {
                debug!(error = %e, "Distribution detection failed, using default security API path");
                SECURITY_API_PATH
            }
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ConnectorError::config(format!("address '{}' cannot be a base URL", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(self.api_path.split('/').filter(|s| !s.is_empty()));
            path.extend(segments);
        }
        Ok(url)
    }

    async fn get_once<T: DeserializeOwned>(
        &self,
        url: &Url,
        subject: Option<(RecordKind, &str)>,
    ) -> Result<T> {
        let response = self
            .http
            .get(url.clone())
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ConnectorError::from_status(status.as_u16(), body, subject));
        }

        Ok(serde_json::from_str(&body)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        subject: Option<(RecordKind, &str)>,
    ) -> Result<T> {
        debug!(%url, "GET");
        self.retry
            .call(|| self.get_once(&url, subject), ConnectorError::is_retryable)
            .await
    }

    async fn get_collection<T>(&self, segment: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Named,
    {
        let url = self.endpoint(&[segment])?;
        let records: BTreeMap<String, T> = self.get_json(url, None).await?;

        Ok(records
            .into_iter()
            .map(|(name, mut record)| {
                record.set_name(name);
                record
            })
            .collect())
    }

    async fn get_record<T>(&self, segment: &str, kind: RecordKind, name: &str) -> Result<T>
    where
        T: DeserializeOwned + Named,
    {
        let url = self.endpoint(&[segment, name])?;
        let mut records: BTreeMap<String, T> = self.get_json(url, Some((kind, name))).await?;

        let mut record = records
            .remove(name)
            .ok_or_else(|| ConnectorError::not_found(kind, name))?;
        record.set_name(name.to_string());
        Ok(record)
    }
}

#[async_trait]
impl PermissionSource for OpenSearchClient {
    #[instrument(skip(self))]
    async fn get_roles(&self) -> Result<Vec<Role>> {
        self.get_collection(ROLES).await
    }

    #[instrument(skip(self))]
    async fn get_role(&self, name: &str) -> Result<Role> {
        self.get_record(ROLES, RecordKind::Role, name).await
    }

    #[instrument(skip(self))]
    async fn get_role_mappings(&self) -> Result<Vec<RoleMapping>> {
        self.get_collection(ROLES_MAPPING).await
    }

    #[instrument(skip(self))]
    async fn get_role_mapping(&self, name: &str) -> Result<RoleMapping> {
        self.get_record(ROLES_MAPPING, RecordKind::RoleMapping, name)
            .await
    }

    #[instrument(skip(self))]
    async fn get_users(&self) -> Result<Vec<User>> {
        self.get_collection(INTERNAL_USERS).await
    }
}
