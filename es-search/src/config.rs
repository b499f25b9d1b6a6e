use crate::error::SearchError;
use crate::messages::Locale;
use crate::search::DEFAULT_GEO_DISTANCE_ATTRIBUTE;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub engine: EngineConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    pub endpoint: String,
    pub index: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default)]
    pub logging: bool,
    #[serde(default = "default_geo_distance_attribute")]
    pub geo_distance_attribute: String,
    pub page_size: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            logging: false,
            geo_distance_attribute: default_geo_distance_attribute(),
            page_size: None,
        }
    }
}

impl SearchConfig {
    pub fn locale(&self) -> Result<Locale, SearchError> {
        self.locale.parse()
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid TOML configuration")?;
        config
            .search
            .locale()
            .context("Invalid [search] locale")?;
        Ok(config)
    }
}

// Default functions
fn default_timeout() -> u64 {
    30
}

fn default_locale() -> String {
    Locale::default().to_string()
}

fn default_geo_distance_attribute() -> String {
    DEFAULT_GEO_DISTANCE_ATTRIBUTE.to_string()
}
