use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;

use common::{metrics, types::Health};
use service::warehouses::WarehouseRepository;

pub mod warehouses;

/// Shared handler state; the repository is injected, never global.
#[derive(Clone)]
pub struct AppState {
    pub warehouses: Arc<dyn WarehouseRepository>,
}

impl AppState {
    pub fn new(warehouses: Arc<dyn WarehouseRepository>) -> Self {
        Self { warehouses }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn metrics_handler() -> (axum::http::StatusCode, String) {
    metrics::encode_metrics()
}

/// Build the full application router: warehouse pages plus health and metrics
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let pages = Router::new()
        .route("/", get(warehouses::index))
        .route("/create", get(warehouses::create_page).post(warehouses::create_submit))
        .route("/edit/:id", get(warehouses::edit_page).post(warehouses::edit_submit))
        .route("/add/:id", get(warehouses::add_page).post(warehouses::add_submit))
        .route("/take/:id", get(warehouses::take_page).post(warehouses::take_submit))
        .route("/delete/:id", post(warehouses::delete));

    let ops = Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics_handler));

    pages
        .merge(ops)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
