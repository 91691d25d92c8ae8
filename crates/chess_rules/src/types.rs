//! Core types shared across the engine.

use serde::{Deserialize, Serialize};

/// Side of the board. `Unknown` is only meaningful in the "checked player"
/// slot, where it means nobody is in check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    White = 0,
    Black = 1,
    Unknown = 2,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
            Color::Unknown => Color::Unknown,
        }
    }

    /// Forward direction for this side's pawns: white advances +8, black -8.
    #[inline]
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
            Color::Unknown => 0,
        }
    }
}

/// Piece kinds, numbered 1..6 as the serializer encodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn = 1,
    Bishop = 2,
    Knight = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

/// One piece on the board. `has_moved` is set on the first move away from
/// the piece's square and never cleared; it gates double pawn pushes and
/// castling, and survives serialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }
}

/// The four independent castle permissions. Rights only ever go from set to
/// cleared, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastleRights {
    pub fn all() -> Self {
        CastleRights {
            white_king_side: true,
            white_queen_side: true,
            black_king_side: true,
            black_queen_side: true,
        }
    }

    pub fn none() -> Self {
        CastleRights {
            white_king_side: false,
            white_queen_side: false,
            black_king_side: false,
            black_queen_side: false,
        }
    }
}

/// Outcome class of the game. Terminal statuses reject further moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing = 0,
    Checkmate = 1,
    Stalemate = 2,
}

/// What a successfully applied move produced, as broadcast to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    /// The applied move as recorded in history, `e.p` suffix included.
    pub uci: String,
    /// Algebraic square of a pawn captured en passant, empty otherwise.
    pub en_passant_capture: String,
    /// Which color is now in check, `Unknown` for none.
    pub checked_player: Color,
    pub status: GameStatus,
}
