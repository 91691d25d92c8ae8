//! The `Game` aggregate: one engine state plus the players seated at it.

use chess_rules::{Color, GameState, MoveResult};

use crate::error::LiveGameError;
use crate::ids::IdGenerator;

/// A game and its two seats. Player ids are opaque 64-bit values; 0 means
/// the seat is open. Seats are write-once.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    id: i64,
    state: GameState,
    white_player: i64,
    black_player: i64,
}

impl Game {
    /// Fresh game with a generated id; the creator takes the chosen seat,
    /// the other stays open.
    pub fn new(ids: &IdGenerator, creator_id: i64, plays_black: bool) -> Self {
        let (white_player, black_player) = if plays_black {
            (0, creator_id)
        } else {
            (creator_id, 0)
        };
        Game {
            id: ids.next_id(),
            state: GameState::new(),
            white_player,
            black_player,
        }
    }

    /// Rebuild an aggregate from persisted parts.
    pub fn recover(id: i64, white_player: i64, black_player: i64, state: GameState) -> Self {
        Game {
            id,
            state,
            white_player,
            black_player,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn white_player(&self) -> i64 {
        self.white_player
    }

    pub fn black_player(&self) -> i64 {
        self.black_player
    }

    pub fn is_player(&self, player_id: i64) -> bool {
        player_id != 0 && (player_id == self.white_player || player_id == self.black_player)
    }

    pub fn set_white_player(&mut self, player_id: i64) -> Result<(), LiveGameError> {
        if self.white_player != 0 {
            return Err(LiveGameError::SeatTaken(Color::White));
        }
        self.white_player = player_id;
        Ok(())
    }

    pub fn set_black_player(&mut self, player_id: i64) -> Result<(), LiveGameError> {
        if self.black_player != 0 {
            return Err(LiveGameError::SeatTaken(Color::Black));
        }
        self.black_player = player_id;
        Ok(())
    }

    /// Apply a move on behalf of a caller: turn ownership is enforced here,
    /// everything else is delegated to the engine.
    pub fn update_move(&mut self, player_id: i64, uci: &str) -> Result<MoveResult, LiveGameError> {
        let seat = match self.state.player_turn() {
            Color::White => self.white_player,
            Color::Black => self.black_player,
            Color::Unknown => 0,
        };
        if player_id == 0 || player_id != seat {
            return Err(LiveGameError::NotYourTurn);
        }
        Ok(self.state.update(uci)?)
    }
}
