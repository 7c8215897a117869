//! RPG state backend entrypoint wiring configuration, MongoDB and the REST layer.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use rpg_state_back::{
    build_router,
    config::{GameConfig, ServerConfig},
    dao::game_store::{
        GameStore,
        mongodb::{MongoConfig, MongoGameStore},
    },
    state::AppState,
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let server = ServerConfig::from_env().context("reading server configuration")?;

    let mongo = MongoConfig::from_uri(&server.mongo_uri, &server.mongo_db, server.connect_timeout)
        .await
        .context("parsing MONGO_URI")?;
    let store = MongoGameStore::connect(mongo)
        .await
        .context("connecting to MongoDB")?;

    let game_store: Arc<dyn GameStore> = Arc::new(store);
    let app_state = AppState::new(game_store.clone(), GameConfig::load());
    let app = build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], server.port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    let served = axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum");

    game_store.close().await;
    served
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable; waiting for Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
