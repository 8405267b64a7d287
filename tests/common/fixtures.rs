//! Test fixtures
//!
//! Records are stored as raw JSON, exactly as the security API returns them.

use opensearch_access_graph::config::{ConnectorConfig, HttpConfig};
use serde_json::{Map, Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API: &str = "/_plugins/_security/api";
pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "integration-secret";

/// A mocked OpenSearch cluster
pub struct MockCluster {
    pub server: MockServer,
    roles: Map<String, Value>,
    mappings: Map<String, Value>,
    users: Map<String, Value>,
}

impl MockCluster {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            roles: Map::new(),
            mappings: Map::new(),
            users: Map::new(),
        }
    }

    pub fn role(mut self, name: &str, body: Value) -> Self {
        self.roles.insert(name.to_string(), body);
        self
    }

    pub fn mapping(mut self, role: &str, body: Value) -> Self {
        self.mappings.insert(role.to_string(), body);
        self
    }

    pub fn user(mut self, name: &str, body: Value) -> Self {
        self.users.insert(name.to_string(), body);
        self
    }

    /// Mount every endpoint. Mapping lookups for unmapped roles answer 404.
    pub async fn mount(self) -> Self {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cluster_name": "integration",
                "version": { "distribution": "opensearch", "number": "2.13.0" }
            })))
            .mount(&self.server)
            .await;

        self.mount_collection("roles", &self.roles).await;
        self.mount_collection("rolesmapping", &self.mappings).await;
        self.mount_collection("internalusers", &self.users).await;

        for (name, body) in &self.roles {
            self.mount_record("roles", name, Some(body)).await;
            self.mount_record("rolesmapping", name, self.mappings.get(name))
                .await;
        }

        self
    }

    async fn mount_collection(&self, segment: &str, records: &Map<String, Value>) {
        Mock::given(method("GET"))
            .and(path(format!("{}/{}", API, segment)))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Object(records.clone())))
            .mount(&self.server)
            .await;
    }

    async fn mount_record(&self, segment: &str, name: &str, body: Option<&Value>) {
        let response = match body {
            Some(body) => {
                let mut wrapped = Map::new();
                wrapped.insert(name.to_string(), body.clone());
                ResponseTemplate::new(200).set_body_json(Value::Object(wrapped))
            }
            None => ResponseTemplate::new(404).set_body_json(json!({
                "status": "NOT_FOUND",
                "message": format!("Resource '{}' not found.", name)
            })),
        };
        Mock::given(method("GET"))
            .and(path(format!("{}/{}/{}", API, segment, name)))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    pub fn config(&self) -> ConnectorConfig {
        ConnectorConfig {
            address: self.server.uri(),
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
            http: HttpConfig {
                timeout_secs: 5,
                max_retries: 1,
                retry_base_delay_ms: 1,
                retry_max_delay_ms: 5,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// The `analyst` role: one cluster permission, mapped to a group and a user
pub async fn analyst_cluster() -> MockCluster {
    MockCluster::start()
        .await
        .role(
            "analyst",
            json!({ "cluster_permissions": ["cluster:monitor/health"] }),
        )
        .mapping(
            "analyst",
            json!({ "backend_roles": ["okta-analysts"], "users": ["alice"] }),
        )
        .user("alice", json!({ "backend_roles": ["okta-analysts"] }))
        .mount()
        .await
}
