//! King move generation, castling candidates included.

use crate::board::column;
use crate::constants::{
    BLACK_KING_HOME, BLACK_KING_ROOK_HOME, BLACK_QUEEN_ROOK_HOME, KING_OFFSETS, WHITE_KING_HOME,
    WHITE_KING_ROOK_HOME, WHITE_QUEEN_ROOK_HOME,
};
use crate::state::GameState;
use crate::types::{Color, PieceKind};

pub(crate) fn king_moves(state: &GameState, from: i8, mover: Color) -> Vec<i8> {
    let mut targets = Vec::new();
    for &offset in &KING_OFFSETS {
        let to = from + offset;
        if !(0..64).contains(&to) || (column(from) - column(to)).abs() > 1 {
            continue;
        }
        match state.piece_at(to) {
            Some(piece) if piece.color == mover => {}
            _ => targets.push(to),
        }
    }
    castle_candidates(state, from, mover, &mut targets);
    targets
}

/// Castling is offered as a two-square king move. Required: the side's
/// castle right is still set, the king stands on its home square, an unmoved
/// rook stands on the matching home square, and every square between them is
/// empty.
fn castle_candidates(state: &GameState, from: i8, mover: Color, targets: &mut Vec<i8>) {
    let rights = state.castle_rights();
    let (home, king_side, queen_side, king_rook, queen_rook) = match mover {
        Color::White => (
            WHITE_KING_HOME,
            rights.white_king_side,
            rights.white_queen_side,
            WHITE_KING_ROOK_HOME,
            WHITE_QUEEN_ROOK_HOME,
        ),
        Color::Black => (
            BLACK_KING_HOME,
            rights.black_king_side,
            rights.black_queen_side,
            BLACK_KING_ROOK_HOME,
            BLACK_QUEEN_ROOK_HOME,
        ),
        Color::Unknown => return,
    };
    if from != home {
        return;
    }
    if king_side
        && rook_at_home(state, king_rook, mover)
        && state.piece_at(home + 1).is_none()
        && state.piece_at(home + 2).is_none()
    {
        targets.push(home + 2);
    }
    if queen_side
        && rook_at_home(state, queen_rook, mover)
        && state.piece_at(home - 1).is_none()
        && state.piece_at(home - 2).is_none()
        && state.piece_at(home - 3).is_none()
    {
        targets.push(home - 2);
    }
}

fn rook_at_home(state: &GameState, pos: i8, mover: Color) -> bool {
    matches!(
        state.piece_at(pos),
        Some(piece) if piece.kind == PieceKind::Rook && piece.color == mover && !piece.has_moved
    )
}
