//! Error types shared across the controller.
//!
//! Each collaborator boundary gets its own enum so callers can decide how far a
//! failure is allowed to travel. None of these are fatal to the app.

use thiserror::Error;

/// Failures at the storage and configuration boundary.
#[derive(Debug, Error)]
pub enum AppError {
    /// Filesystem access failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Settings were present but unusable.
    #[error("config error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

/// Rejected loop commits. These only ever produce a message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Give the loop a name before saving")]
    EmptyName,

    #[error("Loop start and end are the same point")]
    ZeroLength,

    #[error("Mark both A and B before saving a loop")]
    NotNaming,
}
