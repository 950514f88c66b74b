use std::collections::HashMap;
use std::time::Duration;

use pretty_assertions::assert_eq;

use crate::config::{Config, ConfigError};

fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.port, 4001);
    assert_eq!(config.cors_origin, "http://localhost:5173");
    assert_eq!(config.jwt_expiry_hours, 168);
    assert_eq!(config.legacy_migration_delay, Duration::from_millis(1000));
    assert!(config.database_path.is_none());
    assert!(config.legacy_user_email.is_none());
    assert!(config.ai_summary_url.is_none());
    assert!(!config.jwt_secret.is_empty());
}

#[test]
fn test_config_custom_values() {
    let config = config_from(&[
        ("PORT", "8080"),
        ("CORS_ORIGIN", "https://app.example.com"),
        ("DAYBOARD_DB_PATH", "/tmp/board.db"),
        ("JWT_SECRET", "s3cret"),
        ("JWT_EXPIRY_HOURS", "12"),
        ("LEGACY_USER_EMAIL", "owner@example.com"),
        ("LEGACY_MIGRATION_DELAY_MS", "0"),
        ("AI_SUMMARY_URL", "http://localhost:9000/generate"),
    ])
    .unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.cors_origin, "https://app.example.com");
    assert_eq!(config.database_path.as_deref(), Some(std::path::Path::new("/tmp/board.db")));
    assert_eq!(config.jwt_secret, "s3cret");
    assert_eq!(config.jwt_expiry_hours, 12);
    assert_eq!(config.legacy_user_email.as_deref(), Some("owner@example.com"));
    assert_eq!(config.legacy_migration_delay, Duration::ZERO);
    assert_eq!(config.ai_summary_url.as_deref(), Some("http://localhost:9000/generate"));
}

#[test]
fn test_blank_values_fall_back_to_defaults() {
    let config = config_from(&[("PORT", " "), ("LEGACY_USER_EMAIL", "")]).unwrap();
    assert_eq!(config.port, 4001);
    assert!(config.legacy_user_email.is_none());
}

#[test]
fn test_config_invalid_port() {
    assert!(matches!(
        config_from(&[("PORT", "not-a-number")]),
        Err(ConfigError::InvalidPort(_))
    ));
    assert!(matches!(
        config_from(&[("PORT", "0")]),
        Err(ConfigError::PortOutOfRange(0))
    ));
}

#[test]
fn test_config_invalid_numbers() {
    assert!(matches!(
        config_from(&[("JWT_EXPIRY_HOURS", "-1")]),
        Err(ConfigError::InvalidValue { name: "JWT_EXPIRY_HOURS", .. })
    ));
    assert!(matches!(
        config_from(&[("JWT_EXPIRY_HOURS", "100000000000")]),
        Err(ConfigError::InvalidValue { name: "JWT_EXPIRY_HOURS", .. })
    ));
    assert!(matches!(
        config_from(&[("LEGACY_MIGRATION_DELAY_MS", "soon")]),
        Err(ConfigError::InvalidValue { name: "LEGACY_MIGRATION_DELAY_MS", .. })
    ));
}

#[test]
fn test_production_requires_jwt_secret() {
    assert!(matches!(
        config_from(&[("DAYBOARD_ENV", "production")]),
        Err(ConfigError::MissingJwtSecret)
    ));

    let config = config_from(&[("DAYBOARD_ENV", "production"), ("JWT_SECRET", "real")]).unwrap();
    assert_eq!(config.jwt_secret, "real");
}
