use super::dns::{parse_lookup_timeout, DnsConfig};
use super::errors::ConfigError;
use super::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_LOOKUP_TIMEOUT: &str = "MONGO_DNS_LOOKUP_TIMEOUT";
pub const ENV_SERVER: &str = "MONGO_DNS_SERVER";
pub const ENV_PORT: &str = "MONGO_DNS_PORT";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub server: Option<String>,
    pub port: Option<u16>,
    pub lookup_timeout_ms: Option<u64>,
    pub service_name: Option<String>,
    pub log_level: Option<String>,
}

impl Config {
    /// Defaults, then the TOML file (if any), then `MONGO_DNS_*` environment
    /// variables, then CLI overrides.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        config.apply_cli_overrides(cli_overrides);

        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Applies environment overrides through `lookup` so callers and tests can
    /// supply their own source.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(timeout) = lookup(ENV_LOOKUP_TIMEOUT) {
            self.dns.lookup_timeout_ms = parse_lookup_timeout(&timeout)?;
        }

        if let Some(server) = lookup(ENV_SERVER) {
            self.dns.server = Some(server);
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.dns.port = port.trim().parse().map_err(|_| {
                ConfigError::Validation(format!("Invalid {} '{}'", ENV_PORT, port))
            })?;
        }

        Ok(())
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(server) = overrides.server {
            self.dns.server = Some(server);
        }
        if let Some(port) = overrides.port {
            self.dns.port = port;
        }
        if let Some(timeout) = overrides.lookup_timeout_ms {
            self.dns.lookup_timeout_ms = timeout;
        }
        if let Some(service) = overrides.service_name {
            self.dns.service_name = service;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dns.validate()?;

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            other => Err(ConfigError::Validation(format!(
                "Unknown log level '{}'",
                other
            ))),
        }
    }
}
