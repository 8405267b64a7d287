//! End-to-end sync pass tests

#[cfg(test)]
mod tests {
    use crate::common::{MockCluster, analyst_cluster};
    use opensearch_access_graph::core::{EntitlementPurpose, MatchKey, PrincipalKind};
    use opensearch_access_graph::{Connector, GrantTarget, UserMatchKey};
    use serde_json::json;

    #[tokio::test]
    async fn test_analyst_scenario() {
        let cluster = analyst_cluster().await;
        let mut config = cluster.config();
        config.user_match_key = UserMatchKey::Email;

        let connector = Connector::new(config).await.unwrap();
        let report = connector.sync().await.unwrap();

        assert!(report.is_complete());
        assert_eq!(report.roles.len(), 1);
        let analyst = &report.roles[0];
        assert_eq!(analyst.role.to_string(), "role/analyst");

        let labels: Vec<&str> = analyst
            .entitlements
            .iter()
            .map(|e| e.display_name.as_str())
            .collect();
        assert_eq!(
            labels,
            vec![
                "cluster_permission:cluster:monitor/health",
                "group_assignment:okta-analysts",
                "user_assignment:alice",
            ]
        );
        let permission = &analyst.entitlements[0];
        assert_eq!(permission.purpose, EntitlementPurpose::Permission);

        assert_eq!(analyst.grants.len(), 2);
        let group = &analyst.grants[0];
        assert_eq!(
            group.target,
            GrantTarget::ExternalMatch {
                principal_kind: PrincipalKind::Group,
                key: MatchKey::Name,
                value: "okta-analysts".to_string(),
            }
        );
        assert_eq!(group.entitlement, analyst.entitlements[1].id);

        let user = &analyst.grants[1];
        assert_eq!(
            user.target,
            GrantTarget::ExternalMatch {
                principal_kind: PrincipalKind::User,
                key: MatchKey::Email,
                value: "alice".to_string(),
            }
        );
        assert_eq!(user.entitlement, analyst.entitlements[2].id);

        for grant in &analyst.grants {
            let expandable = grant.expandable.as_ref().unwrap();
            assert!(expandable.shallow);
            assert_eq!(expandable.entitlement_ids, vec![permission.id.clone()]);
            assert_eq!(expandable.restricted_to, vec![PrincipalKind::User]);
        }
    }

    #[tokio::test]
    async fn test_unmapped_and_wildcard_roles() {
        let cluster = MockCluster::start()
            .await
            .role(
                "logs_reader",
                json!({
                    "index_permissions": [
                        { "index_patterns": ["logs-*"], "allowed_actions": ["read"] },
                        { "index_patterns": ["metrics-*"], "allowed_actions": ["read", "search"] }
                    ]
                }),
            )
            .role("unassigned", json!({ "cluster_permissions": ["cluster_monitor"] }))
            .mapping("logs_reader", json!({ "users": ["*"], "backend_roles": ["*"] }))
            .mount()
            .await;

        let connector = Connector::new(cluster.config()).await.unwrap();
        let report = connector.sync().await.unwrap();

        assert!(report.is_complete());
        let names: Vec<&str> = report
            .roles
            .iter()
            .map(|r| r.role.resource.as_str())
            .collect();
        assert_eq!(names, vec!["logs_reader", "unassigned"]);

        let reader = &report.roles[0];
        let permissions = reader
            .entitlements
            .iter()
            .filter(|e| e.purpose == EntitlementPurpose::Permission)
            .count();
        // read on logs-*, read on metrics-*, search on metrics-*
        assert_eq!(permissions, 3);

        // Only the user wildcard is special; a backend role named `*` is matched by name
        assert_eq!(
            reader.grants[0].target,
            GrantTarget::ExternalMatch {
                principal_kind: PrincipalKind::Group,
                key: MatchKey::Name,
                value: "*".to_string(),
            }
        );
        assert_eq!(
            reader.grants[1].target,
            GrantTarget::ExternalMatchAll {
                principal_kind: PrincipalKind::User
            }
        );

        let unassigned = &report.roles[1];
        assert_eq!(unassigned.entitlements.len(), 1);
        assert!(unassigned.grants.is_empty());
    }

    #[tokio::test]
    async fn test_resources_include_roles_and_users() {
        let cluster = analyst_cluster().await;
        let connector = Connector::new(cluster.config()).await.unwrap();
        let report = connector.sync().await.unwrap();

        let ids: Vec<String> = report.resources.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["role/analyst", "user/alice"]);
        assert_eq!(report.resources[1].profile["backend_roles"], json!(["okta-analysts"]));

        assert_eq!(report.summary.roles, 1);
        assert_eq!(report.summary.users, 1);
        assert_eq!(report.summary.entitlements, 3);
        assert_eq!(report.summary.grants, 2);
    }

    #[tokio::test]
    async fn test_check_reports_detected_path() {
        let cluster = analyst_cluster().await;
        let connector = Connector::new(cluster.config()).await.unwrap();

        let check = connector.check().await.unwrap();
        assert_eq!(check.roles, 1);
        assert_eq!(
            check.security_api_path.as_deref(),
            Some("/_plugins/_security/api")
        );
    }
}
