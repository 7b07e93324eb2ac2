// Central Error Type for the Bootstrap

use thiserror::Error;

/// Bootstrap-level error type.
///
/// Every variant is fatal: this is a one-shot procedure with no retry and
/// no partial-success state. Errors propagate to the entrypoint, which
/// exits non-zero so the container orchestrator sees a failed start.
#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),

    #[error("required environment variable {0} is empty")]
    EmptyVar(&'static str),

    #[error("invalid API base URL {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },

    #[error("credential store error: {0}")]
    Store(#[from] crate::port::StoreError),

    #[error("process hand-off failed: {0}")]
    Exec(#[from] crate::port::ExecError),
}

/// Result type alias using BootstrapError
pub type Result<T> = std::result::Result<T, BootstrapError>;
