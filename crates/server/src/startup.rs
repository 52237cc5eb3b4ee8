use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, AppState};
use service::warehouses::{InMemoryWarehouseStore, WarehouseRepository};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad listen address {raw}: {e}")))
}

/// Router over a fresh, empty warehouse collection.
pub fn build_app() -> Router {
    let store: Arc<dyn WarehouseRepository> = InMemoryWarehouseStore::new();
    routes::build_router(AppState::new(store), build_cors())
}

/// Bind and serve until `shutdown` resolves.
pub async fn run_until<F>(cfg: AppConfig, shutdown: F) -> Result<(), StartupError>
where
    F: Future<Output = ()> + Send + 'static,
{
    common::metrics::init();
    let app = build_app();

    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(%addr, event = "listening", "warehouse server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    Ok(())
}

/// Public entry: serve until Ctrl+C
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    run_until(cfg, async {
        let _ = tokio::signal::ctrl_c().await;
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    })
    .await
}
