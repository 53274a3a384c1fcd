use std::env;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for catalog-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

/// Storage backend selection.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Persistence configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    #[serde(default)]
    pub url: Option<String>,
    pub max_connections: u32,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// JWT authentication configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
}

impl JwtConfig {
    /// Lifetime of issued tokens.
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.expiration_hours)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Flat variables `DATABASE_URL`, `JWT_SECRET`, `PORT`
    /// 2. Environment variables (DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    /// 5. Built-in defaults
    ///
    /// # Errors
    /// * `ConfigError` - A source failed to parse, a required key is missing,
    ///   or the result fails [`Config::validate`]
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("server.http_port", 3001)?
            .set_default("database.backend", "postgres")?
            .set_default("database.max_connections", 5)?
            .set_default("jwt.expiration_hours", 1)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("jwt.secret", env::var("JWT_SECRET").ok())?
            .set_override_option("server.http_port", env::var("PORT").ok())?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject configurations the service cannot start with.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Empty JWT secret, non-positive token lifetime,
    ///   or Postgres selected without a URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".into()));
        }

        if self.jwt.expiration_hours <= 0 {
            return Err(ConfigError::Message(
                "jwt.expiration_hours must be positive".into(),
            ));
        }

        if self.database.backend == StorageBackend::Postgres
            && self.database.url.as_deref().map_or(true, str::is_empty)
        {
            return Err(ConfigError::Message(
                "database.url is required for the postgres backend".into(),
            ));
        }

        Ok(())
    }
}
