use raptorq_error::RaptorQError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("container is corrupt or truncated: {0}")]
    Container(String),
    #[error(transparent)]
    Core(#[from] raptorq::error::RaptorQCoreError),
}

impl RaptorQError for CliError {}
