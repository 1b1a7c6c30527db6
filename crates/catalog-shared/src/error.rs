//! Shared error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Telemetry error: {0}")]
    TelemetryError(String),
}
