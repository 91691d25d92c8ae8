//! Check detection.
//!
//! A king is in check when any enemy piece has a pseudo-legal move targeting
//! its square. Detection therefore composes the per-piece generators rather
//! than running a separate ray scan, so the two can never disagree.

use crate::move_gen::pseudo_legal_moves;
use crate::state::GameState;
use crate::types::{Color, PieceKind};

/// Locate the king of a color.
pub fn find_king(state: &GameState, color: Color) -> Option<i8> {
    (0..64).find(|&pos| {
        matches!(
            state.piece_at(pos),
            Some(piece) if piece.kind == PieceKind::King && piece.color == color
        )
    })
}

/// Check status of both kings, as (white checked, black checked).
pub fn checked_players(state: &GameState) -> (bool, bool) {
    let white_king = find_king(state, Color::White);
    let black_king = find_king(state, Color::Black);
    let mut white_checked = false;
    let mut black_checked = false;
    for pos in 0..64 {
        let Some(piece) = state.piece_at(pos) else {
            continue;
        };
        let targets = pseudo_legal_moves(state, pos);
        if !white_checked && piece.color == Color::Black {
            white_checked = white_king.is_some_and(|king| targets.contains(&king));
        }
        if !black_checked && piece.color == Color::White {
            black_checked = black_king.is_some_and(|king| targets.contains(&king));
        }
        if white_checked && black_checked {
            break;
        }
    }
    (white_checked, black_checked)
}

/// Whether the king of `color` is currently attacked.
pub fn is_in_check(state: &GameState, color: Color) -> bool {
    let (white_checked, black_checked) = checked_players(state);
    match color {
        Color::White => white_checked,
        Color::Black => black_checked,
        Color::Unknown => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::Piece;

    #[test]
    fn rook_checks_along_open_file() {
        let mut board: Board = [None; 64];
        board[4] = Some(Piece::new(PieceKind::King, Color::White));
        board[60] = Some(Piece::new(PieceKind::Rook, Color::Black));
        board[62] = Some(Piece::new(PieceKind::King, Color::Black));
        let state = GameState::from_position(board, Color::White);
        assert!(is_in_check(&state, Color::White));
        assert!(!is_in_check(&state, Color::Black));
    }

    #[test]
    fn interposed_piece_blocks_the_check() {
        let mut board: Board = [None; 64];
        board[4] = Some(Piece::new(PieceKind::King, Color::White));
        board[12] = Some(Piece::new(PieceKind::Bishop, Color::White));
        board[60] = Some(Piece::new(PieceKind::Rook, Color::Black));
        board[62] = Some(Piece::new(PieceKind::King, Color::Black));
        let state = GameState::from_position(board, Color::White);
        assert!(!is_in_check(&state, Color::White));
    }

    #[test]
    fn pawn_checks_diagonally_only() {
        let mut board: Board = [None; 64];
        board[28] = Some(Piece::new(PieceKind::King, Color::White));
        board[37] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        board[60] = Some(Piece::new(PieceKind::King, Color::Black));
        let state = GameState::from_position(board, Color::White);
        assert!(is_in_check(&state, Color::White));

        let mut board: Board = [None; 64];
        board[28] = Some(Piece::new(PieceKind::King, Color::White));
        board[36] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        board[60] = Some(Piece::new(PieceKind::King, Color::Black));
        let state = GameState::from_position(board, Color::White);
        assert!(!is_in_check(&state, Color::White));
    }
}
