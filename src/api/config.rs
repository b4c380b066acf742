//! Process configuration read from the environment.
//!
//! In production a missing or short JWT_SECRET is a startup error. In
//! development an insecure default secret is used with a warning.

use std::env;
use std::str::FromStr;
use thiserror::Error;
use tracing::warn;

const DEV_JWT_SECRET: &str = "dev-secret-do-not-use-in-production-change-me-now";
const MIN_SECRET_LEN: usize = 32;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("JWT_SECRET environment variable is required in production")]
    MissingJwtSecret,
    #[error("JWT_SECRET must be at least 32 characters in production")]
    WeakJwtSecret,
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Postgres connection string; the in-memory backend is used when absent
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub app_env: String,
    /// Billing granularity; 0 charges exact fractional hours
    pub billing_increment_minutes: u32,
    /// 0 disables rate limiting
    pub rate_limit_per_minute: u32,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// Development defaults: in-memory storage and the development secret.
    pub fn development() -> Self {
        Self {
            port: 8081,
            database_url: None,
            database_max_connections: 10,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            app_env: "development".to_string(),
            billing_increment_minutes: 0,
            rate_limit_per_minute: 100,
            log_format: LogFormat::Text,
        }
    }

    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }

    /// Read the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "production".to_string());
        let is_development = app_env.eq_ignore_ascii_case("development");

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if is_development => {
                warn!("JWT_SECRET not set! Using default secret for development. DO NOT USE IN PRODUCTION!");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => return Err(ConfigError::MissingJwtSecret),
        };
        if jwt_secret.len() < MIN_SECRET_LEN {
            if is_development {
                warn!(
                    "JWT_SECRET is less than {} characters. Consider using a longer secret.",
                    MIN_SECRET_LEN
                );
            } else {
                return Err(ConfigError::WeakJwtSecret);
            }
        }

        let log_format = match env::var("LOG_FORMAT") {
            Ok(value) => match value.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" | "pretty" => LogFormat::Text,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "LOG_FORMAT",
                        value,
                    });
                }
            },
            Err(_) => LogFormat::Text,
        };

        let defaults = Self::development();
        Ok(Self {
            port: parse_var("PORT", defaults.port)?,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            jwt_secret,
            app_env,
            billing_increment_minutes: parse_var(
                "BILLING_INCREMENT_MINUTES",
                defaults.billing_increment_minutes,
            )?,
            rate_limit_per_minute: parse_var("RATE_LIMIT_PER_MINUTE", defaults.rate_limit_per_minute)?,
            log_format,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}
