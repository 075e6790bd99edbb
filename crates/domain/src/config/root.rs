use super::{ConfigError, HandoffConfig, LoggingConfig, MetricsConfig, ServerConfig};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Routes the web server serves itself; the metrics path must not shadow them.
const RESERVED_WEB_PATHS: [&str; 2] = ["/", "/health"];

/// Values given on the command line. Each one, when present, wins over the
/// config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub ingest_address: Option<String>,
    pub web_address: Option<String>,
    pub metrics_path: Option<String>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub metrics: MetricsConfig,

    #[serde(default)]
    pub handoff: HandoffConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads the TOML file at `config_path` (defaults when `None`) and
    /// applies the CLI overrides on top.
    pub fn load(config_path: Option<&str>, overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => {
                let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                    path: path.to_string(),
                    source,
                })?;
                Self::from_toml(&raw)?
            }
            None => Self::default(),
        };

        config.apply_overrides(overrides);
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn apply_overrides(&mut self, overrides: CliOverrides) {
        if let Some(addr) = overrides.ingest_address {
            self.server.ingest_address = addr;
        }
        if let Some(addr) = overrides.web_address {
            self.server.web_address = addr;
        }
        if let Some(path) = overrides.metrics_path {
            self.server.metrics_path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_address("ingest", &self.server.ingest_address)?;
        parse_address("web", &self.server.web_address)?;

        let path = &self.server.metrics_path;
        if !path.starts_with('/')
            || RESERVED_WEB_PATHS.contains(&path.as_str())
            || path.contains(['{', '}'])
        {
            return Err(ConfigError::InvalidMetricsPath(path.clone()));
        }

        if self.metrics.namespace.is_empty() || self.metrics.subsystem.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "metrics",
                reason: "namespace and subsystem must not be empty".to_string(),
            });
        }

        if self.handoff.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "handoff.capacity",
                reason: "must be greater than zero".to_string(),
            });
        }

        if self.handoff.max_frame_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "handoff.max_frame_size",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn ingest_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_address("ingest", &self.server.ingest_address)
    }

    pub fn web_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        parse_address("web", &self.server.web_address)
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<SocketAddr, ConfigError> {
    value
        .parse::<SocketAddr>()
        .map_err(|_| ConfigError::InvalidAddress {
            field,
            value: value.to_string(),
        })
}
