//! Sliding piece move generation (bishop, rook, queen).

use crate::board::{column, row};
use crate::state::GameState;
use crate::types::Color;

/// Walk each ray outward until it leaves the board or meets a piece. An
/// enemy blocker is included once before the ray stops; an own blocker is
/// not. Stepping in (file, rank) space keeps rays from wrapping across the
/// board edge.
pub(crate) fn sliding_moves(
    state: &GameState,
    from: i8,
    mover: Color,
    directions: &[(i8, i8)],
) -> Vec<i8> {
    let mut targets = Vec::new();
    let from_file = column(from);
    let from_rank = row(from);
    for &(file_step, rank_step) in directions {
        for distance in 1..8 {
            let file = from_file + file_step * distance;
            let rank = from_rank + rank_step * distance;
            if !(0..8).contains(&file) || !(0..8).contains(&rank) {
                break;
            }
            let pos = rank * 8 + file;
            match state.piece_at(pos) {
                None => targets.push(pos),
                Some(piece) => {
                    if piece.color != mover {
                        targets.push(pos);
                    }
                    break;
                }
            }
        }
    }
    targets
}
