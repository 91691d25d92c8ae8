//! Error types for the rule engine.
//!
//! Rule violations carry a stable machine-readable code next to the human
//! message; transports forward the code unchanged.

use thiserror::Error;

/// A rejected move attempt. The game state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// Input did not match the UCI grammar.
    #[error("could not parse move")]
    Unparseable,

    /// The game already ended in checkmate.
    #[error("game is over by checkmate")]
    Checkmate,

    /// The game already ended in stalemate.
    #[error("game is over by stalemate")]
    Stalemate,

    /// Origin square is empty or holds an opponent piece.
    #[error("no piece selected or piece not owned")]
    InvalidPieceSelected,

    /// Destination square holds one of the mover's own pieces.
    #[error("destination already occupied by own piece")]
    InvalidPosition,

    /// Origin and destination are the same square.
    #[error("no move made")]
    NoMove,

    /// Destination is not reachable by the selected piece.
    #[error("not a valid movement for the selected piece")]
    MoveNotAllowed,

    /// A pawn reached the last rank without a promotion kind.
    #[error("move requires promotion")]
    MissingPromotion,

    /// The move would leave the mover's own king attacked.
    #[error("move should not result in check")]
    MoveInCheck,
}

impl MoveError {
    /// Stable code surfaced to clients.
    pub fn code(self) -> &'static str {
        match self {
            MoveError::Unparseable => "UNPARSEABLE_MOVE",
            MoveError::Checkmate => "CHECKMATE",
            MoveError::Stalemate => "STALEMATE",
            MoveError::InvalidPieceSelected => "INVALID_PIECE_SELECTED",
            MoveError::InvalidPosition => "INVALID_POSITION",
            MoveError::NoMove => "NO_MOVE",
            MoveError::MoveNotAllowed => "MOVE_NOT_ALLOWED",
            MoveError::MissingPromotion => "MOVE_MISSING_PROMOTION",
            MoveError::MoveInCheck => "MOVE_IN_CHECK",
        }
    }
}

/// Failure while decoding a serialized game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("serialized state is truncated")]
    Truncated,

    #[error("invalid player turn bits {0:#04x}")]
    InvalidTurn(u8),

    #[error("invalid checked-player byte {0:#04x}")]
    InvalidCheckedPlayer(u8),

    #[error("invalid game status byte {0:#04x}")]
    InvalidStatus(u8),

    #[error("invalid piece byte {byte:#04x} at offset {at}")]
    InvalidPiece { byte: u8, at: usize },

    #[error("invalid square byte {0:#04x} in move history")]
    InvalidSquare(u8),

    #[error("invalid move tag byte {0:#04x}")]
    InvalidTag(u8),
}
