//! Configuration loading tests

#[cfg(test)]
mod tests {
    use opensearch_access_graph::config::Config;
    use opensearch_access_graph::{ConfigOverrides, UserMatchKey};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_flags_override_file() {
        let file = write_config(
            r#"
address: "https://file.internal:9200"
username: "file-user"
password: "file-password"
user_match_key: "login"
"#,
        );

        let mut config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.connector.user_match_key, UserMatchKey::Username);

        config.apply(ConfigOverrides {
            address: Some("https://flag.internal:9200".to_string()),
            user_match_key: Some(UserMatchKey::Id),
            ..Default::default()
        });
        config.validate().unwrap();

        assert_eq!(config.connector.address, "https://flag.internal:9200");
        assert_eq!(config.connector.username, "file-user");
        assert_eq!(config.connector.user_match_key, UserMatchKey::Id);
    }

    #[tokio::test]
    async fn test_unknown_match_key_rejected() {
        let file = write_config(
            r#"
address: "https://file.internal:9200"
username: "admin"
password: "admin"
user_match_key: "phone"
"#,
        );

        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_yaml_round_trip_drops_password() {
        let file = write_config(
            r#"
address: "https://file.internal:9200"
username: "admin"
password: "do-not-print"
sync:
  concurrency: 16
"#,
        );

        let config = Config::from_file(file.path()).await.unwrap();
        let yaml = config.to_yaml().unwrap();

        assert!(yaml.contains("concurrency: 16"));
        assert!(!yaml.contains("do-not-print"));
    }
}
