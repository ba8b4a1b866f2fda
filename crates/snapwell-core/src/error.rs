//! Error types shared by the snapwell crates.

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Degenerate or non-orthonormal basis, or a value outside its declared range.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A caller-checkable precondition does not hold (e.g. a magnet attracting itself).
    #[error("Precondition violated: {0}")]
    PreconditionViolated(String),

    /// A scenario description could not be turned into solver inputs.
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
