//! Knight move generation.

use crate::board::column;
use crate::constants::KNIGHT_OFFSETS;
use crate::state::GameState;
use crate::types::Color;

/// Knight jumps land at most two files away; a larger column distance means
/// the offset wrapped around the board edge.
pub(crate) fn knight_moves(state: &GameState, from: i8, mover: Color) -> Vec<i8> {
    let mut targets = Vec::new();
    for &offset in &KNIGHT_OFFSETS {
        let to = from + offset;
        if !(0..64).contains(&to) || (column(from) - column(to)).abs() > 2 {
            continue;
        }
        match state.piece_at(to) {
            Some(piece) if piece.color == mover => {}
            _ => targets.push(to),
        }
    }
    targets
}
