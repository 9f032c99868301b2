use anyhow::Context;
use log::LevelFilter;
use markdown_ledger_engine::{Document, Limits};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Settings for a process hosting markdown-ledger documents.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Limits applied to every document the host creates.
    pub engine: Limits,
    /// `log` filter name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    pub log_level: Option<String>,
}

const CONFIG_FILE: &str = "~/.config/markdown-ledger/config.toml";

impl Config {
    /// Read the config at `config_path`. A missing file is `Ok(None)`, so
    /// callers can fall back to [`Config::default`].
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let content = match std::fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::ConfigReadError {
                    config_path: config_path.to_path_buf(),
                    source,
                });
            }
        };

        toml::from_str(&content)
            .map(Some)
            .map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        let content = toml::to_string_pretty(self).context("serializing config")?;
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        std::fs::write(config_path, content)
            .with_context(|| format!("writing {}", config_path.display()))?;
        log::debug!("Saved config to {}", config_path.display());
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to_path(Self::config_path())
    }

    /// `~/.config/markdown-ledger/config.toml`, with the home directory
    /// expanded.
    pub fn config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(CONFIG_FILE).into_owned())
    }

    /// A fresh empty document under the configured limits.
    pub fn new_document(&self) -> Document {
        Document::with_limits(self.engine.clone())
    }

    /// Log filter for the host's logger. Defaults to `Info`.
    pub fn log_filter(&self) -> Result<LevelFilter, ConfigError> {
        match &self.log_level {
            None => Ok(LevelFilter::Info),
            Some(level) => LevelFilter::from_str(level)
                .map_err(|_| ConfigError::UnknownLogLevel(level.clone())),
        }
    }
}
