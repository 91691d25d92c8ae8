//! Live-play backend for the chess rule engine.
//!
//! Owns the `Game` aggregate (engine state plus the two player seats), the
//! persistence capability, id generation, and the per-game coordinators that
//! serialize concurrent move traffic and fan results out to subscribers.

pub mod error;
pub mod game;
pub mod ids;
pub mod live_game;
pub mod registry;
pub mod repository;

pub use error::LiveGameError;
pub use game::Game;
pub use ids::IdGenerator;
pub use live_game::LiveGame;
pub use registry::LiveGameRegistry;
pub use repository::{GameRepository, InMemoryGameRepository, RepositoryError, StoredGame};
