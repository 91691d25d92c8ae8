//! Pseudo-legal move generation.
//!
//! Produces candidate target squares per piece without regard for whether
//! the mover's king is left attacked; the state machine applies candidates
//! hypothetically and filters the ones that end in check.

mod king;
mod knight;
mod pawn;
mod sliding;

pub mod attack;

pub(crate) use king::king_moves;
pub(crate) use knight::knight_moves;
pub(crate) use pawn::pawn_moves;
pub(crate) use sliding::sliding_moves;

use crate::constants::{BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};
use crate::state::GameState;
use crate::types::PieceKind;

/// Candidate target squares for the piece standing on `from`.
///
/// Empty when the square is empty.
pub fn pseudo_legal_moves(state: &GameState, from: i8) -> Vec<i8> {
    let Some(piece) = state.piece_at(from) else {
        return Vec::new();
    };
    match piece.kind {
        PieceKind::Pawn => pawn_moves(state, from, piece.color),
        PieceKind::Knight => knight_moves(state, from, piece.color),
        PieceKind::King => king_moves(state, from, piece.color),
        PieceKind::Rook => sliding_moves(state, from, piece.color, &ROOK_DIRECTIONS),
        PieceKind::Bishop => sliding_moves(state, from, piece.color, &BISHOP_DIRECTIONS),
        PieceKind::Queen => sliding_moves(state, from, piece.color, &QUEEN_DIRECTIONS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::{Color, Piece};

    fn lone_piece_board(pos: usize, kind: PieceKind, color: Color) -> Board {
        let mut board: Board = [None; 64];
        board[pos] = Some(Piece::new(kind, color));
        board
    }

    fn sorted(mut targets: Vec<i8>) -> Vec<i8> {
        targets.sort_unstable();
        targets
    }

    #[test]
    fn knight_on_a_file_does_not_wrap() {
        // a4 knight: b6, c5, c3, b2 only.
        let state = GameState::from_position(
            lone_piece_board(24, PieceKind::Knight, Color::White),
            Color::White,
        );
        assert_eq!(sorted(pseudo_legal_moves(&state, 24)), vec![9, 18, 34, 41]);
    }

    #[test]
    fn knight_on_h_file_does_not_wrap() {
        // h4 knight: g6, f5, f3, g2 only.
        let state = GameState::from_position(
            lone_piece_board(31, PieceKind::Knight, Color::White),
            Color::White,
        );
        assert_eq!(sorted(pseudo_legal_moves(&state, 31)), vec![14, 21, 37, 46]);
    }

    #[test]
    fn rook_rays_stop_at_board_edges() {
        let state = GameState::from_position(
            lone_piece_board(0, PieceKind::Rook, Color::White),
            Color::White,
        );
        let expected: Vec<i8> = (1..8).chain((1..8).map(|rank| rank * 8)).collect();
        assert_eq!(sorted(pseudo_legal_moves(&state, 0)), sorted(expected));
    }

    #[test]
    fn bishop_rays_stop_at_board_edges() {
        // h1 bishop sees exactly the a8-h1 diagonal.
        let state = GameState::from_position(
            lone_piece_board(7, PieceKind::Bishop, Color::White),
            Color::White,
        );
        assert_eq!(
            sorted(pseudo_legal_moves(&state, 7)),
            vec![14, 21, 28, 35, 42, 49, 56]
        );
    }

    #[test]
    fn sliding_ray_includes_enemy_blocker_and_stops() {
        let mut board = lone_piece_board(0, PieceKind::Rook, Color::White);
        board[3] = Some(Piece::new(PieceKind::Pawn, Color::Black));
        board[16] = Some(Piece::new(PieceKind::Pawn, Color::White));
        let state = GameState::from_position(board, Color::White);
        // Right: b1, c1, d1 (capture). Up: a2 only, own pawn on a3 blocks.
        assert_eq!(sorted(pseudo_legal_moves(&state, 0)), vec![1, 2, 3, 8]);
    }

    #[test]
    fn pawn_double_push_requires_unmoved_pawn_and_clear_path() {
        let state = GameState::new();
        assert_eq!(sorted(pseudo_legal_moves(&state, 12)), vec![20, 28]);

        let mut board = lone_piece_board(12, PieceKind::Pawn, Color::White);
        if let Some(pawn) = board[12].as_mut() {
            pawn.has_moved = true;
        }
        let moved = GameState::from_position(board, Color::White);
        assert_eq!(pseudo_legal_moves(&moved, 12), vec![20]);

        let mut blocked = lone_piece_board(12, PieceKind::Pawn, Color::White);
        blocked[20] = Some(Piece::new(PieceKind::Knight, Color::Black));
        let blocked = GameState::from_position(blocked, Color::White);
        assert!(pseudo_legal_moves(&blocked, 12).is_empty());
    }

    #[test]
    fn pawn_captures_only_diagonally_without_wrapping() {
        // White pawn on h4; black piece on a5 must not be capturable.
        let mut board = lone_piece_board(31, PieceKind::Pawn, Color::White);
        if let Some(pawn) = board[31].as_mut() {
            pawn.has_moved = true;
        }
        board[32] = Some(Piece::new(PieceKind::Rook, Color::Black));
        board[38] = Some(Piece::new(PieceKind::Rook, Color::Black));
        let state = GameState::from_position(board, Color::White);
        assert_eq!(sorted(pseudo_legal_moves(&state, 31)), vec![38, 39]);
    }

    #[test]
    fn king_steps_one_square_without_wrapping() {
        let state = GameState::from_position(
            lone_piece_board(7, PieceKind::King, Color::White),
            Color::White,
        );
        assert_eq!(sorted(pseudo_legal_moves(&state, 7)), vec![6, 14, 15]);
    }
}
