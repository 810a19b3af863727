//! Error types.
//!
//! State-machine and registry operations fail with `GameError`. Every
//! variant is local and non-fatal: the caller turns it into a user-facing
//! message, and the session is left exactly as it was before the call.

use thiserror::Error;

/// Failure of a state-machine or registry operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// A game, player name or player identity could not be resolved.
    #[error("not found: {0}")]
    NotFound(String),

    /// The action is not allowed in the current state.
    #[error("invalid action: {0}")]
    InvalidAction(String),

    /// The action collides with existing state (name already taken).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl GameError {
    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidAction(msg.into())
    }

    pub(crate) fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

pub type GameResult<T> = std::result::Result<T, GameError>;

/// Failure to load a card catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog has no prompt cards")]
    EmptyPrompts,

    #[error("catalog has no response cards")]
    EmptyResponses,

    #[error("catalog blank marker is empty")]
    EmptyBlankMarker,
}

/// Failure to encode or decode a session record.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("failed to encode session: {0}")]
    Encode(bincode::Error),

    #[error("failed to decode session: {0}")]
    Decode(bincode::Error),

    #[error(transparent)]
    Game(#[from] GameError),
}
