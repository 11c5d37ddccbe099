use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::source::HttpRequestSource;
use crate::state::AppState;

pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

pub async fn ingest(State(state): State<AppState>, request: Request) -> Response {
    // Routed for every method so non-POST gets the 400 envelope instead of a 405.
    let (parts, body) = request.into_parts();
    let source = HttpRequestSource::new(parts.method, body, state.max_body_bytes);
    state.gateway.handle(source).await.into_response()
}
