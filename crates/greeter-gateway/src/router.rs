//! Axum router wiring.
//!
//! - `POST /greeting`, `POST /expensive` : HTTP JSON adapter
//! - `GET /v1/rpc` : RPC session (WebSocket upgrade)
//! - `GET /healthz`, `GET /metrics` : operational endpoints

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/greeting", post(transport::http::greeting))
        .route("/expensive", post(transport::http::expensive))
        .route("/v1/rpc", get(transport::rpc::rpc_upgrade))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
