//! Error types for cranesim

use thiserror::Error;

/// Main error type for the crate.
///
/// The per-frame simulation never returns errors; these cover loading and
/// validating configuration.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}
