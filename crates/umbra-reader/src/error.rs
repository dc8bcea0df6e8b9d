//! Error types for the reader binary.
//!
//! [`ReaderError`] wraps every failure mode between startup and the last
//! line of output.

use umbra_types::IdParseError;

/// Top-level error for the reader binary.
#[derive(Debug, thiserror::Error)]
pub enum ReaderError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: umbra_core::ConfigError,
    },

    /// A ledger or chunk dump could not be loaded.
    #[error("source error: {source}")]
    Source {
        /// The underlying source error.
        #[from]
        source: umbra_core::SourceError,
    },

    /// The reader could not be created.
    #[error("reconcile error: {source}")]
    Reconcile {
        /// The underlying reconcile error.
        #[from]
        source: umbra_core::ReconcileError,
    },

    /// A command-line argument is malformed.
    #[error("invalid argument {argument:?}: {message}")]
    Argument {
        /// The argument as given.
        argument: String,
        /// What is wrong with it.
        message: String,
    },

    /// A planet id argument is not hex.
    #[error("invalid planet id {argument:?}: {source}")]
    PlanetId {
        /// The argument as given.
        argument: String,
        /// Why it failed to parse.
        source: IdParseError,
    },

    /// Writing output failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Encoding output failed.
    #[error("encode error: {source}")]
    Encode {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
