//! greeter gateway
//!
//! - `POST /greeting`, `POST /expensive` (JSON)
//! - `GET /v1/rpc` (RPC over WebSocket)
//! - `GET /metrics`, `GET /healthz`

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use greeter_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // Config is optional; defaults apply when GREETER_CONFIG is unset
    let cfg = config::load_from_env()?;
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|e| format!("gateway.listen must be a valid SocketAddr: {e}"))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "greeter-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("greeter-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
