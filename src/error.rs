//! Error taxonomy for the feature session.
//!
//! Missing-target mutations (deleting, renaming or hiding a feature that is
//! not there, removing an unknown item) are not errors: they resolve to a
//! no-op so that stale or duplicated events cannot break a session.

use thiserror::Error;

/// A mutation would break a tree invariant. The mutation is aborted and the
/// previous snapshot stays authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    #[error("duplicate feature id: {0}")]
    DuplicateFeatureId(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Invariant(#[from] InvariantError),

    /// The message carried a type tag this build does not know. Usually a
    /// protocol version mismatch between host and plugin.
    #[error("unrecognized event type: {0}")]
    UnrecognizedEvent(String),

    #[error("malformed message: {0}")]
    Malformed(String),

    #[error("features have not been initialized")]
    NotInitialized,

    #[error("features were already initialized")]
    AlreadyInitialized,
}

impl Error {
    /// Protocol errors come from the sender; invariant errors from the
    /// current tree state.
    pub fn is_protocol(&self) -> bool {
        !matches!(self, Self::Invariant(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
