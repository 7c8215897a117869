//! Library crate for rpg-state-back, exposing modules for binaries and integration tests.

pub mod config;
pub mod dao;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the top-level router and attach cross-cutting middleware layers.
pub fn build_router(state: state::SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
