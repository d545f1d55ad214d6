//! RPC adapter over WebSocket.
//!
//! Responsibilities:
//! - Upgrade HTTP -> WS on `/v1/rpc`
//! - One text frame in (`{"s": ...}`), one text frame out (`{"greeting": ...}`)
//! - Each request runs on its own task with a child of the session token; the
//!   session token is cancelled when the socket loop ends
//! - Lifecycle: ping/pong + idle timeout
//!
//! Requests go to the RPC greeter chain (logging over the prefixing greeter),
//! not the HTTP service chain. There is no error channel: a cancelled call or
//! an undecodable frame is answered with an empty greeting and logged.

use axum::{
    extract::{ws::Message, ws::WebSocket, ws::WebSocketUpgrade, State},
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

use greeter_core::protocol::rpc::{RpcGreetRequest, RpcGreetResponse};

use crate::app_state::AppState;
use crate::service::RpcGreetingService;

fn reply_json(greeting: String) -> String {
    serde_json::to_string(&RpcGreetResponse { greeting })
        .unwrap_or_else(|_| r#"{"greeting":""}"#.to_string())
}

/// Handle one request frame and build the reply frame.
pub async fn handle_text(
    svc: &dyn RpcGreetingService,
    cancel: &CancellationToken,
    text: &str,
) -> String {
    let req: RpcGreetRequest = match serde_json::from_str(text) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "rpc request decode failed");
            return reply_json(String::new());
        }
    };

    match svc.greet_rpc(cancel, &req.s).await {
        Ok(greeting) => reply_json(greeting),
        Err(e) => {
            tracing::warn!(error = %e, "rpc greet failed");
            reply_json(String::new())
        }
    }
}

// --------------------
// Entry
// --------------------
pub async fn rpc_upgrade(State(app): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_session(app, socket))
}

// --------------------
// Session loop
// --------------------
async fn run_session(app: AppState, socket: WebSocket) {
    let session = CancellationToken::new();
    let _cancel_on_exit = session.clone().drop_guard();

    // ---- outbound channel
    let (out_tx, mut out_rx) = mpsc::channel::<Message>(1024);

    // ---- split socket
    let (mut ws_tx, mut ws_rx) = socket.split();

    // ---- timers
    let gw = &app.cfg().gateway;
    let ping_every = Duration::from_millis(gw.ping_interval_ms);
    let idle_timeout = Duration::from_millis(gw.idle_timeout_ms);

    let mut ping_tick = tokio::time::interval(ping_every);
    ping_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    let mut last_activity = Instant::now();
    tracing::debug!("rpc session opened");

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(m) => {
                        if ws_tx.send(m).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let msg = match incoming {
                    Some(Ok(msg)) => msg,
                    Some(Err(e)) => {
                        tracing::debug!(error = %e, "rpc socket read failed");
                        break;
                    }
                    None => break,
                };

                last_activity = Instant::now();

                match msg {
                    Message::Text(text) => {
                        let svc = app.rpc_service();
                        let cancel = session.child_token();
                        let tx = out_tx.clone();
                        tokio::spawn(async move {
                            let reply = handle_text(svc.as_ref(), &cancel, &text).await;
                            let _ = tx.send(Message::Text(reply)).await;
                        });
                    }
                    Message::Binary(_) => {
                        tracing::warn!("rpc binary frames are not supported");
                        let _ = out_tx.send(Message::Text(reply_json(String::new()))).await;
                    }
                    Message::Ping(payload) => {
                        let _ = out_tx.send(Message::Pong(payload)).await;
                    }
                    Message::Pong(_) => {}
                    Message::Close(_) => break,
                }
            }

            // ping
            _ = ping_tick.tick() => {
                let _ = out_tx.send(Message::Ping(Vec::new())).await;
            }

            // idle timeout
            _ = tokio::time::sleep(Duration::from_millis(250)) => {
                if last_activity.elapsed() >= idle_timeout {
                    tracing::debug!("rpc session idle timeout");
                    break;
                }
            }
        }
    }

    tracing::debug!("rpc session closed");
}
