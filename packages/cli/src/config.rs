use std::env;
use std::num::ParseIntError;
use std::path::PathBuf;
use std::time::Duration;

use dayboard_core::constants::DEFAULT_PORT;
use thiserror::Error;
use tracing::warn;

/// Signing secret used when `JWT_SECRET` is unset outside production
const DEV_JWT_SECRET: &str = "dayboard-dev-secret-change-me";

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 168;
/// One year
const MAX_JWT_EXPIRY_HOURS: i64 = 24 * 366;
const DEFAULT_LEGACY_DELAY_MS: u64 = 1000;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[source] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("JWT_SECRET must be set when DAYBOARD_ENV=production")]
    MissingJwtSecret,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: Option<PathBuf>,
    pub cors_origin: String,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub legacy_user_email: Option<String>,
    pub legacy_migration_delay: Duration,
    pub ai_summary_url: Option<String>,
    pub ai_summary_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(ConfigError::InvalidPort)?,
            None => DEFAULT_PORT,
        };
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let production = var("DAYBOARD_ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"));
        let jwt_secret = match var("JWT_SECRET") {
            Some(secret) => secret,
            None if production => return Err(ConfigError::MissingJwtSecret),
            None => {
                warn!("JWT_SECRET is not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
        };

        let jwt_expiry_hours = parse_or(
            "JWT_EXPIRY_HOURS",
            var("JWT_EXPIRY_HOURS"),
            DEFAULT_JWT_EXPIRY_HOURS,
        )?;
        if !(1..=MAX_JWT_EXPIRY_HOURS).contains(&jwt_expiry_hours) {
            return Err(ConfigError::InvalidValue {
                name: "JWT_EXPIRY_HOURS",
                value: jwt_expiry_hours.to_string(),
            });
        }

        let delay_ms = parse_or(
            "LEGACY_MIGRATION_DELAY_MS",
            var("LEGACY_MIGRATION_DELAY_MS"),
            DEFAULT_LEGACY_DELAY_MS,
        )?;

        Ok(Config {
            port,
            database_path: var("DAYBOARD_DB_PATH").map(PathBuf::from),
            cors_origin: var("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            jwt_secret,
            jwt_expiry_hours,
            legacy_user_email: var("LEGACY_USER_EMAIL"),
            legacy_migration_delay: Duration::from_millis(delay_ms),
            ai_summary_url: var("AI_SUMMARY_URL"),
            ai_summary_api_key: var("AI_SUMMARY_API_KEY"),
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}
