use thiserror::Error;

use crate::config::ConfigError;
use crate::logging::LoggingError;

/// Unified result type for fallible setup in the panel crate.
///
/// Rendering itself never fails; only wiring up sinks, loading configuration
/// or asking the terminal for its size can.
pub type Result<T> = std::result::Result<T, PanelError>;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
