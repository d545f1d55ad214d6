//! HTTP JSON adapter.
//!
//! Operation errors are answered with `200` and an `err` field. A body that
//! fails to decode produces `500` (raw decode error as the body), unless
//! `gateway.fold_decode_errors` folds it into the envelope as well.
//! Infrastructure errors (a failed request task) are always `500`.
//!
//! The service call runs on its own task owned by the request scope, so a
//! client disconnect cancels the call instead of discarding it.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use greeter_core::error::Result;
use greeter_core::protocol::http::{
    envelope, Envelope, ExpensiveRequest, ExpensiveResponse, GreetRequest, GreetResponse,
};

use crate::app_state::AppState;
use crate::service::GreetingService;
use crate::transport::codec::decode_json;
use crate::transport::scope::{effective_deadline, RequestScope};

fn decode_failure<T: Envelope + Serialize>(app: &AppState, e: serde_json::Error) -> Response {
    tracing::warn!(error = %e, "request body decode failed");
    if app.cfg().gateway.fold_decode_errors {
        (StatusCode::OK, Json(T::err(e.to_string()))).into_response()
    } else {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
    }
}

fn respond<T: Envelope + Serialize>(res: Result<String>) -> Response {
    match res {
        Err(e) if !e.is_application() => {
            tracing::error!(error = %e, "request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
        res => Json(envelope::<T>(res)).into_response(),
    }
}

fn scope_for(app: &AppState, headers: &HeaderMap) -> RequestScope {
    RequestScope::new(effective_deadline(app.cfg().gateway.request_timeout(), headers))
}

pub async fn greeting(State(app): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let req: GreetRequest = match decode_json(&body) {
        Ok(r) => r,
        Err(e) => return decode_failure::<GreetResponse>(&app, e),
    };

    let svc = app.service();
    let res = scope_for(&app, &headers)
        .run(move |cancel| async move { svc.greet(&cancel, &req.s).await })
        .await;
    respond::<GreetResponse>(res)
}

pub async fn expensive(State(app): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let req: ExpensiveRequest = match decode_json(&body) {
        Ok(r) => r,
        Err(e) => return decode_failure::<ExpensiveResponse>(&app, e),
    };

    let svc = app.service();
    let res = scope_for(&app, &headers)
        .run(move |cancel| async move {
            svc.expensive(&cancel, &req.connection_string, &req.username, &req.password)
                .await
        })
        .await;
    respond::<ExpensiveResponse>(res)
}
