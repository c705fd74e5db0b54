//! Error types for the engine binary.

use std::path::PathBuf;

/// Top-level error for the engine binary.
///
/// Each variant wraps one subsystem's error so that `main` can propagate
/// with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: crate::config::ConfigError,
    },

    /// The advisor rejected the trip.
    #[error("advisor error: {source}")]
    Advisor {
        /// The underlying advisor error.
        #[from]
        source: greenerway_advisor::AdvisorError,
    },

    /// Recording or reading progress failed.
    #[error("progress error: {source}")]
    Progress {
        /// The underlying progress error.
        #[from]
        source: greenerway_progress::ProgressError,
    },

    /// An input file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Input {
        /// The file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// JSON input or output failed.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serde error.
        #[from]
        source: serde_json::Error,
    },
}
