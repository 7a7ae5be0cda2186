//! API configuration
//!
//! Settings are layered: built-in defaults, then an optional TOML file
//! (`config/default.toml`, or the path in `NORTHWIND_CONFIG`), then `API_*`
//! environment variables. A `.env` file is read first if present.
//!
//! The connection string is resolved separately, see
//! [`resolve_connection_string`].

use serde::Deserialize;
use sqlx::postgres::PgConnectOptions;
use std::time::Duration;

use infra_db::pool::DEFAULT_DATABASE_URL;
use infra_db::{parse_connection_string, DatabaseError};

/// Environment variable that overrides every configured connection string
pub const CONNECTION_STRING_ENV: &str = "NORTHWIND_CS";

/// Environment variable naming the configuration file
pub const CONFIG_FILE_ENV: &str = "NORTHWIND_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "config/default";

/// Named connection strings, as in `[connection_strings]` of the config file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConnectionStrings {
    pub northwind: Option<String>,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL, if configured directly
    #[serde(default)]
    pub database_url: Option<String>,
    /// Named connection strings
    #[serde(default)]
    pub connection_strings: ConnectionStrings,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// `text` or `json`
    pub log_format: String,
    /// Deadline for a whole request, in seconds
    pub request_timeout_secs: u64,
    /// Server-side statement timeout, in seconds
    #[serde(default)]
    pub statement_timeout_secs: Option<u64>,
    /// Maximum pool size
    pub max_connections: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: None,
            connection_strings: ConnectionStrings::default(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            request_timeout_secs: 30,
            statement_timeout_secs: None,
            max_connections: 10,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `.env`, the config file, and `API_*` variables
    ///
    /// Nested keys use a double underscore, e.g.
    /// `API_CONNECTION_STRINGS__NORTHWIND`.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let file = std::env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("log_level", defaults.log_level)?
            .set_default("log_format", defaults.log_format)?
            .set_default("request_timeout_secs", defaults.request_timeout_secs as i64)?
            .set_default("max_connections", i64::from(defaults.max_connections))?
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix("API")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request deadline
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolves connect options against the process environment
    pub fn connect_options(&self) -> Result<PgConnectOptions, DatabaseError> {
        let env = std::env::var(CONNECTION_STRING_ENV).ok();
        let configured = self
            .database_url
            .as_deref()
            .or(self.connection_strings.northwind.as_deref());
        resolve_connection_string(env.as_deref(), configured)
    }
}

/// Picks the connection string: environment override, then configuration,
/// then the development default
///
/// Blank values count as unset. The chosen string may be a URL or a
/// `key=value;` string; see [`parse_connection_string`].
pub fn resolve_connection_string(
    env: Option<&str>,
    configured: Option<&str>,
) -> Result<PgConnectOptions, DatabaseError> {
    let chosen = [env, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_DATABASE_URL);

    parse_connection_string(chosen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::postgres::PgSslMode;

    #[test]
    fn test_env_wins_over_configured() {
        let options = resolve_connection_string(Some("postgres://env/db"), Some("postgres://cfg/db")).unwrap();
        assert_eq!(options.get_host(), "env");
    }

    #[test]
    fn test_configured_used_without_env() {
        let options = resolve_connection_string(None, Some("postgres://cfg/db")).unwrap();
        assert_eq!(options.get_host(), "cfg");
    }

    #[test]
    fn test_default_when_nothing_set() {
        for options in [
            resolve_connection_string(None, None).unwrap(),
            resolve_connection_string(Some("  "), Some("")).unwrap(),
        ] {
            assert_eq!(options.get_host(), "localhost");
            assert_eq!(options.get_database(), Some("northwind"));
            assert_eq!(options.get_username(), "postgres");
        }
    }

    #[test]
    fn test_keyword_string_keeps_every_setting() {
        let options = resolve_connection_string(
            Some("host=db.prod;db=northwind;uid=app;pwd=x;sslmode=require"),
            None,
        )
        .unwrap();
        assert_eq!(options.get_host(), "db.prod");
        assert_eq!(options.get_database(), Some("northwind"));
        assert_eq!(options.get_username(), "app");
        assert!(matches!(options.get_ssl_mode(), PgSslMode::Require));
    }

    #[test]
    fn test_unknown_keyword_is_rejected() {
        let err = resolve_connection_string(None, Some("host=db;Trust Server Certificate=true")).unwrap_err();
        assert!(matches!(err, DatabaseError::InvalidConnectionString(_)));
    }

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.log_format, "text");
    }
}
