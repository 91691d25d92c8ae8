//! Error types for the live-play layer.

use chess_rules::{Color, MoveError};
use thiserror::Error;

use crate::repository::RepositoryError;

/// Errors surfaced by the coordinator and the `Game` aggregate.
#[derive(Debug, Error)]
pub enum LiveGameError {
    /// The caller does not own the side whose turn it is.
    #[error("not your turn")]
    NotYourTurn,

    /// A rule violation from the engine; the engine code is preserved.
    #[error(transparent)]
    Rule(#[from] MoveError),

    /// The seat is already occupied; seats are write-once.
    #[error("{0:?} seat is already taken")]
    SeatTaken(Color),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// The coordinator worker has already shut down.
    #[error("live game is closed")]
    Closed,
}

impl LiveGameError {
    /// Stable machine code for transports.
    pub fn code(&self) -> &'static str {
        match self {
            LiveGameError::NotYourTurn => "NOT_YOUR_TURN",
            LiveGameError::Rule(err) => err.code(),
            LiveGameError::SeatTaken(_) => "SEAT_ALREADY_TAKEN",
            LiveGameError::Repository(_) => "REPOSITORY_ERROR",
            LiveGameError::Closed => "GAME_CLOSED",
        }
    }
}
