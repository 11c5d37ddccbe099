use axum::{
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::{healthz, ingest, readyz};
use crate::state::AppState;

pub fn build_router(state: AppState, ingest_route: &str) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route(ingest_route, any(ingest))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
