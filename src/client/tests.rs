//! Tests for the security API client

#[cfg(test)]
mod tests {
    use crate::client::{
        LEGACY_SECURITY_API_PATH, OpenSearchClient, PermissionSource, SECURITY_API_PATH,
    };
    use crate::config::{ConnectorConfig, HttpConfig};
    use crate::utils::error::{ConnectorError, RecordKind};
    use serde_json::json;
    use wiremock::matchers::{basic_auth, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> ConnectorConfig {
        ConnectorConfig {
            address: server.uri(),
            username: "admin".to_string(),
            password: "s3cret".to_string(),
            http: HttpConfig {
                timeout_secs: 5,
                max_retries: 2,
                retry_base_delay_ms: 1,
                retry_max_delay_ms: 5,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn mount_root(server: &MockServer, distribution: &str) {
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "cluster_name": "test",
                "version": { "distribution": distribution, "number": "2.11.0" }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_detects_opensearch_distribution() {
        let server = MockServer::start().await;
        mount_root(&server, "OpenSearch").await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        assert_eq!(client.api_path(), SECURITY_API_PATH);
    }

    #[tokio::test]
    async fn test_legacy_distribution_uses_opendistro_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "version": { "number": "7.10.2" } })),
            )
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        assert_eq!(client.api_path(), LEGACY_SECURITY_API_PATH);
    }

    #[tokio::test]
    async fn test_detection_failure_keeps_default_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        assert_eq!(client.api_path(), SECURITY_API_PATH);
    }

    #[tokio::test]
    async fn test_get_roles_sorted_with_names() {
        let server = MockServer::start().await;
        mount_root(&server, "opensearch").await;
        Mock::given(method("GET"))
            .and(path("/_plugins/_security/api/roles"))
            .and(basic_auth("admin", "s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "zeta": { "cluster_permissions": ["cluster_monitor"] },
                "alpha": {
                    "reserved": true,
                    "index_permissions": [{ "index_patterns": ["logs-*"], "allowed_actions": ["read"] }]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        let roles = client.get_roles().await.unwrap();

        let names: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
        assert!(roles[0].reserved);
        assert_eq!(roles[0].index_permissions[0].allowed_actions, vec!["read"]);
    }

    #[tokio::test]
    async fn test_get_role_unwraps_nested_record() {
        let server = MockServer::start().await;
        mount_root(&server, "opensearch").await;
        Mock::given(method("GET"))
            .and(path("/_plugins/_security/api/roles/analyst"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "analyst": { "cluster_permissions": ["cluster_monitor"] }
            })))
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        let role = client.get_role("analyst").await.unwrap();

        assert_eq!(role.name, "analyst");
        assert_eq!(role.cluster_permissions, vec!["cluster_monitor"]);
    }

    #[tokio::test]
    async fn test_missing_role_mapping_is_not_found() {
        let server = MockServer::start().await;
        mount_root(&server, "opensearch").await;
        Mock::given(method("GET"))
            .and(path("/_plugins/_security/api/rolesmapping/analyst"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status": "NOT_FOUND",
                "message": "Resource 'analyst' not found."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        let err = client.get_role_mapping("analyst").await.unwrap_err();

        assert!(err.is_not_found(RecordKind::RoleMapping));
    }

    #[tokio::test]
    async fn test_record_absent_from_body_is_not_found() {
        let server = MockServer::start().await;
        mount_root(&server, "opensearch").await;
        Mock::given(method("GET"))
            .and(path("/_plugins/_security/api/roles/analyst"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        let err = client.get_role("analyst").await.unwrap_err();

        assert!(err.is_not_found(RecordKind::Role));
    }

    #[tokio::test]
    async fn test_unauthorized_is_not_retried() {
        let server = MockServer::start().await;
        mount_root(&server, "opensearch").await;
        Mock::given(method("GET"))
            .and(path("/_plugins/_security/api/internalusers"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        let err = client.get_users().await.unwrap_err();

        assert!(matches!(err, ConnectorError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried() {
        let server = MockServer::start().await;
        mount_root(&server, "opensearch").await;
        Mock::given(method("GET"))
            .and(path("/_plugins/_security/api/rolesmapping"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/_plugins/_security/api/rolesmapping"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "analyst": { "backend_roles": ["data-team"], "users": ["alice"] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        let mappings = client.get_role_mappings().await.unwrap();

        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].name, "analyst");
        assert_eq!(mappings[0].users, vec!["alice"]);
    }

    #[tokio::test]
    async fn test_server_error_surfaces_after_retries() {
        let server = MockServer::start().await;
        mount_root(&server, "opensearch").await;
        Mock::given(method("GET"))
            .and(path("/_plugins/_security/api/roles"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .expect(3)
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        let err = client.get_roles().await.unwrap_err();

        assert!(matches!(err, ConnectorError::Api { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_internal_users_keyed_by_username() {
        let server = MockServer::start().await;
        mount_root(&server, "opensearch").await;
        Mock::given(method("GET"))
            .and(path("/_plugins/_security/api/internalusers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "bob": { "backend_roles": ["ops"], "attributes": { "team": "sre" } },
                "alice": { "description": "analyst" }
            })))
            .mount(&server)
            .await;

        let client = OpenSearchClient::connect(&config(&server)).await.unwrap();
        let users = client.get_users().await.unwrap();

        assert_eq!(users[0].username, "alice");
        assert_eq!(users[1].username, "bob");
        assert_eq!(users[1].attributes["team"], json!("sre"));
    }

    #[test]
    fn test_invalid_address_rejected() {
        let config = ConnectorConfig {
            address: "mailto:admin@example.com".to_string(),
            ..Default::default()
        };
        assert!(OpenSearchClient::new(&config).is_err());
    }
}
