//! Identifier stability across passes

#[cfg(test)]
mod tests {
    use crate::common::{MockCluster, analyst_cluster};
    use opensearch_access_graph::Connector;
    use serde_json::json;

    #[tokio::test]
    async fn test_two_passes_yield_identical_reports() {
        let cluster = analyst_cluster().await;
        let connector = Connector::new(cluster.config()).await.unwrap();

        let first = connector.sync().await.unwrap();
        let second = connector.sync().await.unwrap();

        assert_eq!(first.roles, second.roles);
        assert_eq!(first.resources, second.resources);
    }

    #[tokio::test]
    async fn test_ids_stable_across_clusters_with_same_content() {
        let a = analyst_cluster().await;
        let b = analyst_cluster().await;

        let report_a = Connector::new(a.config()).await.unwrap().sync().await.unwrap();
        let report_b = Connector::new(b.config()).await.unwrap().sync().await.unwrap();

        assert_eq!(report_a.roles, report_b.roles);
    }

    #[tokio::test]
    async fn test_index_pattern_order_does_not_change_ids() {
        let first = MockCluster::start()
            .await
            .role(
                "reader",
                json!({ "index_permissions": [
                    { "index_patterns": ["a-*", "b-*"], "allowed_actions": ["read"] }
                ]}),
            )
            .mount()
            .await;
        let second = MockCluster::start()
            .await
            .role(
                "reader",
                json!({ "index_permissions": [
                    { "index_patterns": ["b-*", "a-*"], "allowed_actions": ["read"] }
                ]}),
            )
            .mount()
            .await;

        let a = Connector::new(first.config()).await.unwrap().sync().await.unwrap();
        let b = Connector::new(second.config()).await.unwrap().sync().await.unwrap();

        assert_eq!(a.roles[0].entitlements[0].id, b.roles[0].entitlements[0].id);
    }

    #[tokio::test]
    async fn test_ids_differ_between_roles() {
        let cluster = MockCluster::start()
            .await
            .role("one", json!({ "cluster_permissions": ["cluster_monitor"] }))
            .role("two", json!({ "cluster_permissions": ["cluster_monitor"] }))
            .mount()
            .await;

        let report = Connector::new(cluster.config())
            .await
            .unwrap()
            .sync()
            .await
            .unwrap();

        assert_ne!(
            report.roles[0].entitlements[0].id,
            report.roles[1].entitlements[0].id
        );
    }
}
