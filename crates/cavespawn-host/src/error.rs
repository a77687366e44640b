//! Error types for the host adapter binary.
//!
//! [`HostError`] wraps every failure mode during startup so `main` can
//! propagate with `?`. Per-line protocol errors never become a
//! `HostError`; they are answered on stdout and the loop continues.

/// Top-level error for the host adapter binary.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: cavespawn_core::config::ConfigError,
    },

    /// The configuration was rejected during validation.
    #[error("invalid configuration: {source}")]
    Snapshot {
        /// The underlying validation error.
        #[from]
        source: cavespawn_core::snapshot::SnapshotError,
    },

    /// Reading stdin or writing stdout failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A response could not be serialized.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The tracing subscriber could not be installed.
    #[error("logging error: {message}")]
    Logging {
        /// Description of the failure.
        message: String,
    },
}
