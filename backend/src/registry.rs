//! Process-wide registry of live games.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::LiveGameError;
use crate::live_game::LiveGame;
use crate::repository::GameRepository;

/// Maps game ids to running coordinators. Coordinators are created on first
/// use and evict themselves when their last subscriber leaves.
pub struct LiveGameRegistry {
    games: Mutex<HashMap<i64, Arc<LiveGame>>>,
    repository: Arc<dyn GameRepository>,
}

impl LiveGameRegistry {
    pub fn new(repository: Arc<dyn GameRepository>) -> Arc<Self> {
        Arc::new(LiveGameRegistry {
            games: Mutex::new(HashMap::new()),
            repository,
        })
    }

    /// Coordinator for a game, loading the aggregate from the repository
    /// when none is live. With `force_refresh` the aggregate is re-loaded
    /// and swapped into the running coordinator, making externally changed
    /// state (a newly seated player) visible to it.
    pub async fn get_or_create(
        self: &Arc<Self>,
        game_id: i64,
        force_refresh: bool,
    ) -> Result<Arc<LiveGame>, LiveGameError> {
        if !force_refresh {
            if let Some(live) = self.games.lock().get(&game_id) {
                return Ok(Arc::clone(live));
            }
        }
        // Loading happens outside the map lock; the lock is never held
        // across I/O.
        let game = self.repository.get_game(game_id).await?;
        let mut games = self.games.lock();
        if let Some(live) = games.get(&game_id) {
            if force_refresh {
                live.replace_game(game);
            }
            return Ok(Arc::clone(live));
        }
        let live = LiveGame::spawn(game, Arc::clone(&self.repository), Arc::downgrade(self));
        games.insert(game_id, Arc::clone(&live));
        tracing::debug!(game_id, "live game created");
        Ok(live)
    }

    /// Whether a coordinator is currently live for this game id.
    pub fn is_live(&self, game_id: i64) -> bool {
        self.games.lock().contains_key(&game_id)
    }

    pub(crate) fn evict(&self, game_id: i64) {
        self.games.lock().remove(&game_id);
    }
}
