use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use stddomain::SuffixList;
use tracing::level_filters::LevelFilter;

pub const DEFAULT_CONFIG_PATH: &str = "stddomain.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum LogLevel {
    #[serde(rename = "trace")]
    Trace,
    #[serde(rename = "debug")]
    Debug,
    #[serde(rename = "info")]
    Info,
    #[default]
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct LogConfig {
    /// Minimum level written to stderr.
    #[serde(default)]
    pub level: LogLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct SuffixConfig {
    /// Public suffix list file to use instead of the bundled one.
    pub path: Option<String>,
    /// Also match rules from the list's private section (github.io, blogspot.com, ...).
    #[serde(default)]
    pub include_private: bool,
}

impl SuffixConfig {
    pub fn load(&self) -> anyhow::Result<Cow<'static, SuffixList>> {
        match (&self.path, self.include_private) {
            (Some(path), include_private) => {
                Ok(Cow::Owned(SuffixList::from_path(path, include_private)?))
            }
            (None, true) => Ok(Cow::Borrowed(SuffixList::bundled_with_private())),
            (None, false) => Ok(Cow::Borrowed(SuffixList::bundled())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub suffix: SuffixConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found")]
    NotFound,
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("{0}")]
    Decode(String),
}

fn decode_from_path(path: &str) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ConfigError::NotFound,
        _ => ConfigError::Read(e),
    })?;
    let config: Config =
        toml::from_str(&content).map_err(|e| ConfigError::Decode(e.message().into()))?;
    Ok(config)
}

/// Load the config, falling back to defaults when the file doesn't exist.
pub fn load_config(config_path: &str) -> anyhow::Result<Config> {
    match decode_from_path(config_path) {
        Ok(cfg) => Ok(cfg),
        Err(ConfigError::NotFound) => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
