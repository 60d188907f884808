//! Error types.

use thiserror::Error;

use crate::location::Loc;

/// Reasons a move is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Location is not on the field
    #[error("Illegal move: location {0} is off the field")]
    OffBoard(Loc),
    /// Cell already holds a dot or belongs to a base
    #[error("Illegal move: location {0} is not free")]
    Occupied(Loc),
    /// Move only gets the dot captured and suicide is disabled
    #[error("Illegal move: suicide at location {0}")]
    Suicide(Loc),
}

#[derive(Debug, Error)]
pub enum DotsError {
    #[error("field size {x}x{y} is outside the supported range")]
    InvalidSize { x: usize, y: usize },

    #[error("start position {pos} does not fit a {x}x{y} field")]
    StartPosTooLarge { pos: String, x: usize, y: usize },

    #[error("invalid field diagram: {0}")]
    InvalidField(String),

    #[error("invalid rules: {0}")]
    InvalidRules(String),

    #[error("invalid move text: {0}")]
    InvalidMove(String),

    #[error(transparent)]
    Move(#[from] MoveError),
}

pub type Result<T> = std::result::Result<T, DotsError>;
