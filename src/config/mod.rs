//! Width guard configuration.
//!
//! Defaults match what the host plugin has always done: echo violations to
//! stderr and append them to `~/.pi/agent/tui-width-errors.log`. Environment
//! variables and a JSON document can override any field.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::width::WidthMode;

pub const LOG_FILE_NAME: &str = "tui-width-errors.log";
pub const ENV_GUARD: &str = "DEX_TUI_GUARD";
pub const ENV_LOG_PATH: &str = "DEX_TUI_WIDTH_LOG";
pub const ENV_WIDTH_MODE: &str = "DEX_TUI_WIDTH_MODE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuardConfig {
    /// Master switch; a disabled guard measures nothing.
    pub enabled: bool,
    /// Print violations to stderr.
    pub echo_stderr: bool,
    /// Append-only JSON-lines log. `None` disables file logging.
    pub log_path: Option<PathBuf>,
    pub width_mode: WidthMode,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            echo_stderr: true,
            log_path: default_log_path(),
            width_mode: WidthMode::default(),
        }
    }
}

impl GuardConfig {
    /// Enabled, but with no stderr echo and no file.
    pub fn quiet() -> Self {
        Self {
            enabled: true,
            echo_stderr: false,
            log_path: None,
            width_mode: WidthMode::default(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::quiet()
        }
    }

    pub fn with_log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_path = Some(path.into());
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo_stderr = echo;
        self
    }

    pub fn with_width_mode(mut self, mode: WidthMode) -> Self {
        self.width_mode = mode;
        self
    }

    /// Defaults overlaid with `DEX_TUI_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Overlay values from `lookup`, which maps variable names to values.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_GUARD) {
            self.enabled = parse_switch(ENV_GUARD, &value)?;
        }
        if let Some(value) = lookup(ENV_LOG_PATH) {
            let trimmed = value.trim();
            self.log_path = if trimmed.is_empty() {
                None
            } else {
                Some(PathBuf::from(trimmed))
            };
        }
        if let Some(value) = lookup(ENV_WIDTH_MODE) {
            self.width_mode =
                WidthMode::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                    key: ENV_WIDTH_MODE,
                    value,
                })?;
        }
        Ok(self)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

/// `<home>/.pi/agent/tui-width-errors.log`, if a home directory exists.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".pi").join("agent").join(LOG_FILE_NAME))
}

fn parse_switch(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
