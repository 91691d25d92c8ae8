//! Per-game coordinator.
//!
//! One worker task owns the aggregate. Clients enqueue UCI commands on a
//! bounded queue; the worker applies them serially, persists each accepted
//! move and fans the result out to every subscriber in acceptance order.
//! Rule violations go only to the sink of the client that submitted the
//! move.

use std::sync::{Arc, Weak};

use chess_rules::MoveResult;
use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot, Mutex as AsyncMutex};

use crate::error::LiveGameError;
use crate::game::Game;
use crate::registry::LiveGameRegistry;
use crate::repository::GameRepository;

/// Capacity of the per-game command queue; a full queue back-pressures the
/// submitting client.
pub const COMMAND_QUEUE_CAPACITY: usize = 10;

/// One move submission.
struct MoveCommand {
    uci: String,
    player_id: i64,
    errors: mpsc::Sender<LiveGameError>,
}

pub struct LiveGame {
    game_id: i64,
    game: Mutex<Game>,
    commands: mpsc::Sender<MoveCommand>,
    shutdown: Mutex<Option<oneshot::Sender<()>>>,
    subscribers: AsyncMutex<Vec<mpsc::Sender<MoveResult>>>,
    repository: Arc<dyn GameRepository>,
    registry: Weak<LiveGameRegistry>,
}

impl LiveGame {
    /// Start a coordinator and its worker task.
    pub(crate) fn spawn(
        game: Game,
        repository: Arc<dyn GameRepository>,
        registry: Weak<LiveGameRegistry>,
    ) -> Arc<Self> {
        let (commands, commands_rx) = mpsc::channel(COMMAND_QUEUE_CAPACITY);
        let (shutdown, shutdown_rx) = oneshot::channel();
        let live = Arc::new(LiveGame {
            game_id: game.id(),
            game: Mutex::new(game),
            commands,
            shutdown: Mutex::new(Some(shutdown)),
            subscribers: AsyncMutex::new(Vec::new()),
            repository,
            registry,
        });
        tokio::spawn(Self::run(Arc::clone(&live), commands_rx, shutdown_rx));
        live
    }

    pub fn game_id(&self) -> i64 {
        self.game_id
    }

    /// Snapshot of the aggregate as the worker currently sees it.
    pub fn game(&self) -> Game {
        self.game.lock().clone()
    }

    /// Enqueue a move. Suspends while the queue is full; rule violations for
    /// this command are delivered to `errors`, never broadcast.
    pub async fn execute(
        &self,
        uci: &str,
        player_id: i64,
        errors: mpsc::Sender<LiveGameError>,
    ) -> Result<(), LiveGameError> {
        let command = MoveCommand {
            uci: uci.to_owned(),
            player_id,
            errors,
        };
        self.commands
            .send(command)
            .await
            .map_err(|_| LiveGameError::Closed)
    }

    /// Register a result sink. Delivery preserves move order.
    pub async fn subscribe(&self, sink: mpsc::Sender<MoveResult>) {
        self.subscribers.lock().await.push(sink);
    }

    /// Remove a sink. Removing the last one shuts the worker down and evicts
    /// the coordinator from the registry; commands still queued are dropped.
    pub async fn unsubscribe(&self, sink: &mpsc::Sender<MoveResult>) {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.retain(|existing| !existing.same_channel(sink));
        if subscribers.is_empty() {
            if let Some(shutdown) = self.shutdown.lock().take() {
                let _ = shutdown.send(());
            }
            if let Some(registry) = self.registry.upgrade() {
                registry.evict(self.game_id);
            }
            tracing::debug!(game_id = self.game_id, "last subscriber left, shutting down");
        }
    }

    /// Swap the aggregate under the coordinator after it changed outside the
    /// live session (seat assignment).
    pub(crate) fn replace_game(&self, game: Game) {
        *self.game.lock() = game;
    }

    async fn run(
        live: Arc<LiveGame>,
        mut commands: mpsc::Receiver<MoveCommand>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                command = commands.recv() => {
                    match command {
                        Some(command) => live.process(command).await,
                        None => break,
                    }
                }
            }
        }
        tracing::debug!(game_id = live.game_id, "live game worker stopped");
    }

    async fn process(&self, command: MoveCommand) {
        let outcome = self
            .game
            .lock()
            .update_move(command.player_id, &command.uci);
        match outcome {
            Ok(result) => {
                let snapshot = self.game();
                if let Err(err) = self.repository.save_game(&snapshot).await {
                    // The in-memory move stands; the next successful save
                    // persists the full state again.
                    tracing::error!(
                        game_id = self.game_id,
                        error = %err,
                        "failed to persist game after move"
                    );
                }
                let subscribers = self.subscribers.lock().await;
                for subscriber in subscribers.iter() {
                    let _ = subscriber.send(result.clone()).await;
                }
            }
            Err(err) => {
                let _ = command.errors.send(err).await;
            }
        }
    }
}
