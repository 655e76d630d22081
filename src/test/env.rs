#[cfg(test)]
mod tests {
    use serial_test::serial;

    use crate::env::{AppConfig, DEFAULT_DATABASE_URL, DEFAULT_MAX_CONNECTIONS};

    const KEYS: [&str; 5] = [
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "OTLP_ENDPOINT",
        "OTLP_API_KEY",
        "DEPLOYMENT_ENVIRONMENT",
    ];

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        let unset: Vec<(&str, Option<&str>)> = KEYS.iter().map(|key| (*key, None)).collect();

        let config = temp_env::with_vars(unset, || AppConfig::from_env())
            .expect("Defaults should load");

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(config.otlp_endpoint, None);
        assert_eq!(config.otlp_api_key, None);
        assert_eq!(config.deployment_environment, "develop");
    }

    #[test]
    #[serial]
    fn test_values_from_environment() {
        let config = temp_env::with_vars(
            [
                ("DATABASE_URL", Some("sqlite::memory:")),
                ("DATABASE_MAX_CONNECTIONS", Some("12")),
                ("OTLP_ENDPOINT", Some("https://collector.example:4317")),
                ("OTLP_API_KEY", Some("  ")),
                ("DEPLOYMENT_ENVIRONMENT", Some("production")),
            ],
            || AppConfig::from_env(),
        )
        .expect("Config should load");

        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 12);
        assert_eq!(
            config.otlp_endpoint.as_deref(),
            Some("https://collector.example:4317")
        );
        assert_eq!(config.otlp_api_key, None);
        assert_eq!(config.deployment_environment, "production");
    }

    #[test]
    #[serial]
    fn test_invalid_connection_count_is_an_error() {
        let result = temp_env::with_var("DATABASE_MAX_CONNECTIONS", Some("many"), || {
            AppConfig::from_env()
        });

        assert!(result.is_err());
    }
}
