use axum::Router;

use crate::state::SharedState;

pub mod docs;
pub mod health;
pub mod json;
pub mod leaderboard;
pub mod nfts;
pub mod players;
pub mod root;

/// Compose all route trees, wiring in shared state and documentation routes.
pub fn router(state: SharedState) -> Router<()> {
    let api_router = root::router()
        .merge(health::router())
        .merge(players::router())
        .merge(leaderboard::router())
        .merge(nfts::router());

    let docs_router = docs::router(state.clone());

    api_router.merge(docs_router).with_state(state)
}
