mod config;
mod controllers;
mod init;
mod models;
mod prelude;
mod progress;
mod result;
mod store;

use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use tokio::signal;

use crate::{config::Config, store::Store};

#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn Store>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = config::build_from_env()?;

    tracing_subscriber::fmt()
        .with_max_level(cfg.log_level)
        .init();

    let store = init::init_store(&cfg).await?;

    let state = AppState {
        store: store.clone(),
    };

    let router = app(&cfg, state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.server_port));
    tracing::info!(%addr, "API running");

    axum::Server::bind(&addr)
        .serve(router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("store closed, bye");

    return Ok(());
}

pub fn app(cfg: &Config, state: AppState) -> Router {
    let router = Router::new();

    let router = controllers::add_routes(router);

    let router = router.with_state(state);

    return init::add_layers(router, cfg);
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to listen for sigterm: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutting down");
}
