//! Error types for the society engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during engine startup.

/// Top-level error for the society engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: hyperbeings_core::config::ConfigError,
    },

    /// A seed being could not be created.
    #[error("society error: {source}")]
    Society {
        /// The underlying society error.
        #[from]
        source: hyperbeings_core::society::SocietyError,
    },

    /// The control console reader could not be started.
    #[error("control input error: {source}")]
    ControlInput {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
