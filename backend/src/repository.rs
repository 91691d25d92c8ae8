//! Persistence capability for game aggregates.
//!
//! The live-play layer only depends on the two-method [`GameRepository`]
//! trait; backends can be in-memory, on disk or a remote KV store. The
//! stored record wraps the engine's bit-packed bytes with the seat
//! assignment.

use std::collections::HashMap;

use async_trait::async_trait;
use chess_rules::GameState;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::Game;

/// Persisted outer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredGame {
    pub game_id: i64,
    pub white_player: i64,
    pub black_player: i64,
    pub game_state: Vec<u8>,
}

impl StoredGame {
    pub fn from_game(game: &Game) -> Self {
        StoredGame {
            game_id: game.id(),
            white_player: game.white_player(),
            black_player: game.black_player(),
            game_state: game.state().to_bytes(),
        }
    }

    pub fn into_game(self) -> Result<Game, RepositoryError> {
        let state = GameState::from_bytes(&self.game_state)
            .map_err(|err| RepositoryError::Decode(err.to_string()))?;
        Ok(Game::recover(
            self.game_id,
            self.white_player,
            self.black_player,
            state,
        ))
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("game {0} not found")]
    NotFound(i64),

    #[error("stored game could not be decoded: {0}")]
    Decode(String),

    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Two-method persistence seam the registry and coordinators depend on.
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn get_game(&self, id: i64) -> Result<Game, RepositoryError>;
    async fn save_game(&self, game: &Game) -> Result<(), RepositoryError>;
}

/// Map-backed repository for tests and single-process deployments.
#[derive(Default)]
pub struct InMemoryGameRepository {
    entries: Mutex<HashMap<i64, Vec<u8>>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn get_game(&self, id: i64) -> Result<Game, RepositoryError> {
        let raw = self
            .entries
            .lock()
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))?;
        let stored: StoredGame =
            serde_json::from_slice(&raw).map_err(|err| RepositoryError::Decode(err.to_string()))?;
        stored.into_game()
    }

    async fn save_game(&self, game: &Game) -> Result<(), RepositoryError> {
        let stored = StoredGame::from_game(game);
        let raw = serde_json::to_vec(&stored)
            .map_err(|err| RepositoryError::Backend(err.to_string()))?;
        self.entries.lock().insert(stored.game_id, raw);
        Ok(())
    }
}
