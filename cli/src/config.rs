use std::path::Path;

use serde::Deserialize;

/// Overrides for the encode/decode CLI flags, mirroring `AppConfig::from_toml`/`validate`.
#[derive(Clone, Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub symbol_size: Option<usize>,
    #[serde(default)]
    pub repair_overhead: Option<u32>,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "CacheConfig::default_threshold")]
    pub threshold: u32,
}

impl CacheConfig {
    fn default_threshold() -> u32 {
        raptorq::cache::DEFAULT_CACHE_ESI_THRESHOLD
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { enabled: false, threshold: Self::default_threshold() }
    }
}

impl AppConfig {
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_file(path: &Path) -> Result<Self, crate::error::CliError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_toml(&contents)?)
    }

    pub fn validate(&self) -> Result<(), crate::error::CliError> {
        if let Some(size) = self.symbol_size {
            if size == 0 {
                return Err(crate::error::CliError::InvalidConfig("symbol_size must be non-zero".into()));
            }
        }
        Ok(())
    }
}
