use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid {field} address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("Invalid metrics path '{0}': must start with '/', avoid '/' and '/health', and contain no '{{' or '}}'")]
    InvalidMetricsPath(String),

    #[error("Invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
