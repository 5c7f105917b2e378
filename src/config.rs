// config.rs
use serde::Deserialize;

use crate::middleware::ErrorPolicy;

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. "info" or "subway=debug"
    pub level: String,
    /// Return handler errors to the client instead of an empty response.
    pub propagate_errors: bool,
}

impl LoggingConfig {
    pub fn error_policy(&self) -> ErrorPolicy {
        if self.propagate_errors {
            ErrorPolicy::Propagate
        } else {
            ErrorPolicy::Suppress
        }
    }
}

/// Global configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config from `config/default.toml` and environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let settings = Self::builder()?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        Ok(cfg)
    }

    fn builder() -> anyhow::Result<config::builder::ConfigBuilder<config::builder::DefaultState>> {
        Ok(config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.propagate_errors", false)?)
    }
}
