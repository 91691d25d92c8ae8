//! Board representation and square arithmetic.
//!
//! Squares are indexed 0..63 with `square = rank * 8 + file`, so a1 = 0,
//! h1 = 7 and h8 = 63. White's back rank occupies 0..7.

use crate::types::{Color, Piece, PieceKind};

/// 64 optional pieces, a1 first.
pub type Board = [Option<Piece>; 64];

/// File index of a square (0 = a-file).
#[inline]
pub fn column(pos: i8) -> i8 {
    pos % 8
}

/// Rank index of a square (0 = first rank).
#[inline]
pub fn row(pos: i8) -> i8 {
    pos / 8
}

/// Convert a file letter and 1-based rank to a square index.
pub fn coords_to_pos(file: char, rank: u8) -> Option<i8> {
    if !('a'..='h').contains(&file) || !(1..=8).contains(&rank) {
        return None;
    }
    Some(((rank as i8 - 1) * 8) + (file as u8 - b'a') as i8)
}

/// Algebraic name of a square ("e4").
pub fn pos_to_algebraic(pos: i8) -> String {
    let file = (b'a' + (pos % 8) as u8) as char;
    format!("{}{}", file, pos / 8 + 1)
}

/// Standard starting position.
pub fn initial_board() -> Board {
    let mut board: Board = [None; 64];
    let back_rank = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    for (file, kind) in back_rank.into_iter().enumerate() {
        board[file] = Some(Piece::new(kind, Color::White));
        board[8 + file] = Some(Piece::new(PieceKind::Pawn, Color::White));
        board[48 + file] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        board[56 + file] = Some(Piece::new(kind, Color::Black));
    }
    board
}
