use std::env;

use auth::LifetimePolicy;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default = "default_platform")]
    pub platform: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    /// PostgreSQL URL; the in-memory store is used when absent
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_expiration_seconds")]
    pub default_expiration_seconds: i64,
    #[serde(default = "default_expiration_seconds")]
    pub max_expiration_seconds: i64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

impl JwtConfig {
    pub fn lifetime_policy(&self) -> LifetimePolicy {
        LifetimePolicy::new(self.default_expiration_seconds, self.max_expiration_seconds)
    }
}

fn default_platform() -> String {
    "production".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_expiration_seconds() -> i64 {
    LifetimePolicy::DEFAULT_SECONDS
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, SERVER__HTTP_PORT, PLATFORM, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// No signing secret ships with the defaults, so loading fails until
    /// `JWT__SECRET` (or `jwt.secret` in a mode file) is provided.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_source(configuration)
    }

    fn from_source(configuration: ConfigBuilder) -> Result<Self, ConfigError> {
        let config: Config = configuration.try_deserialize()?;

        if config.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    /// Whether destructive admin endpoints are enabled.
    pub fn is_dev(&self) -> bool {
        self.platform == "dev"
    }
}

#[cfg(test)]
mod tests {
    use config::builder::ConfigBuilder as SourceBuilder;
    use config::builder::DefaultState;
    use config::FileFormat;

    use super::*;

    const SHIPPED_DEFAULTS: &str = include_str!("../../config/default.toml");

    fn shipped_defaults() -> SourceBuilder<DefaultState> {
        ConfigBuilder::builder().add_source(File::from_str(SHIPPED_DEFAULTS, FileFormat::Toml))
    }

    #[test]
    fn test_shipped_defaults_carry_no_secret() {
        let result = Config::from_source(shipped_defaults().build().unwrap());

        assert!(result.is_err());
    }

    #[test]
    fn test_shipped_defaults_keep_reset_disabled() {
        let config = Config::from_source(
            shipped_defaults()
                .set_override("jwt.secret", "operator-provided-secret")
                .unwrap()
                .build()
                .unwrap(),
        )
        .unwrap();

        assert_eq!(config.platform, "production");
        assert!(!config.is_dev());
        assert!(config.database.url.is_none());
        assert_eq!(config.server.http_port, 8080);
        assert_eq!(config.jwt.lifetime_policy(), LifetimePolicy::default());
    }

    #[test]
    fn test_blank_secret_rejected() {
        let result = Config::from_source(
            shipped_defaults()
                .set_override("jwt.secret", "   ")
                .unwrap()
                .build()
                .unwrap(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_from_minimal_source() {
        let config = Config::from_source(
            ConfigBuilder::builder()
                .set_override("server.http_port", 8080)
                .unwrap()
                .set_override("jwt.secret", "secret")
                .unwrap()
                .build()
                .unwrap(),
        )
        .unwrap();

        assert_eq!(config.platform, "production");
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.jwt.lifetime_policy(), LifetimePolicy::default());
    }

    #[test]
    fn test_dev_platform_must_be_explicit() {
        let config = Config::from_source(
            shipped_defaults()
                .set_override("jwt.secret", "secret")
                .unwrap()
                .set_override("platform", "dev")
                .unwrap()
                .build()
                .unwrap(),
        )
        .unwrap();

        assert!(config.is_dev());
    }
}
