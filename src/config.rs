use std::env;
use thiserror::Error;

/// Default listen address when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// AppConfig
///
/// Holds the service's entire configuration state. Immutable once loaded and
/// pulled into handlers via `FromRef`, so every request sees the same values.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and which settings are mandatory.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Postgres connection string for the user directory. Mandatory in production.
    pub db_url: Option<String>,
    // JSON file of users for the in-memory directory (local only).
    pub users_file: Option<String>,
}

/// Env
///
/// Defines the runtime context: local development (seeded users, pretty logs)
/// or production (Postgres-backed directory, JSON logs).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    MissingInProduction(&'static str),
}

impl Default for AppConfig {
    /// Local configuration with the seeded in-memory directory. Used by test
    /// setup so state can be built without touching the environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            db_url: None,
            users_file: None,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables at startup.
    ///
    /// Locally every setting is optional. In production `DATABASE_URL` must be
    /// present, since the seeded directory is a development convenience only.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = non_empty_var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let db_url = non_empty_var("DATABASE_URL");

        match env {
            Env::Local => Ok(Self {
                env,
                bind_addr,
                db_url,
                users_file: non_empty_var("USERS_FILE"),
            }),
            Env::Production => Ok(Self {
                env,
                bind_addr,
                db_url: Some(db_url.ok_or(ConfigError::MissingInProduction("DATABASE_URL"))?),
                users_file: None,
            }),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
