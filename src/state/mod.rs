use std::sync::Arc;

use crate::{config::GameConfig, dao::game_store::GameStore};

/// Handle cloned into every request.
pub type SharedState = Arc<AppState>;

/// Central application state: the storage client injected at startup and the game tuning.
pub struct AppState {
    game_store: Arc<dyn GameStore>,
    config: GameConfig,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(game_store: Arc<dyn GameStore>, config: GameConfig) -> SharedState {
        Arc::new(Self { game_store, config })
    }

    /// Storage handle shared by every request.
    pub fn game_store(&self) -> &Arc<dyn GameStore> {
        &self.game_store
    }

    /// Game tuning loaded at startup.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}
