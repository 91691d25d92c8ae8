//! Pawn move generation.
//!
//! Forward pushes, the double push off the home rank, diagonal captures and
//! the one-ply en-passant window. White advances +8, black -8; promotion is
//! resolved by the state machine when the move is applied.

use crate::board::column;
use crate::state::GameState;
use crate::types::{Color, PieceKind};

pub(crate) fn pawn_moves(state: &GameState, from: i8, mover: Color) -> Vec<i8> {
    let forward = mover.pawn_direction();
    let mut targets = Vec::new();

    let one_ahead = from + forward;
    if (0..64).contains(&one_ahead) && state.piece_at(one_ahead).is_none() {
        targets.push(one_ahead);
        let two_ahead = from + 2 * forward;
        let unmoved = matches!(state.piece_at(from), Some(piece) if !piece.has_moved);
        if unmoved && (0..64).contains(&two_ahead) && state.piece_at(two_ahead).is_none() {
            targets.push(two_ahead);
        }
    }

    for capture in [from + forward - 1, from + forward + 1] {
        if !(0..64).contains(&capture) || (column(from) - column(capture)).abs() != 1 {
            continue;
        }
        match state.piece_at(capture) {
            Some(piece) if piece.color != mover => targets.push(capture),
            Some(_) => {}
            None => {
                if en_passant_allowed(state, capture, forward, mover) {
                    targets.push(capture);
                }
            }
        }
    }

    targets
}

/// The empty diagonal square is takeable en passant when the previous move
/// was a two-square pawn push landing directly behind it.
fn en_passant_allowed(state: &GameState, capture: i8, forward: i8, mover: Color) -> bool {
    if !state.last_move_was_pawn_jump() {
        return false;
    }
    let jumped = capture - forward;
    if state.last_move_destination() != Some(jumped) {
        return false;
    }
    matches!(
        state.piece_at(jumped),
        Some(piece) if piece.kind == PieceKind::Pawn && piece.color != mover
    )
}
