//! HTTP handlers translating between the outside world and the bus.
//!
//! Status mapping: a successful reply is 200 with the reply body as JSON.
//! `NoHandlerAvailable` and `Timeout` are 5xx (503/504), a transport failure
//! is 502, and `HandlerFailed` is the caller's fault class: 400 on add, 404
//! on get.

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

use crate::bus::{BusError, CommandBus};
use crate::store::protocol::{CHANNEL_ADD_ORDER, CHANNEL_GET_ORDERS};

/// How long the gateway waits for a reply before answering 504. A timeout
/// means "outcome unknown", not "did not happen".
const BUS_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds the public HTTP router over the given bus.
pub fn router(bus: Arc<CommandBus>) -> Router {
    Router::new()
        .route("/", get(handle_greeting))
        .route("/add-order", post(handle_add_order))
        .route("/get-orders", get(handle_get_orders))
        .layer(Extension(bus))
}

async fn handle_greeting() -> &'static str {
    "Welcome to the order gateway, let's have some fun!"
}

async fn handle_add_order(
    Extension(bus): Extension<Arc<CommandBus>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    tracing::info!("addOrder request received, forwarding over the bus");

    match bus
        .request(CHANNEL_ADD_ORDER, body, BUS_REQUEST_TIMEOUT)
        .await
    {
        Ok(reply) => (StatusCode::OK, Json(reply)),
        Err(e) => {
            tracing::warn!("addOrder request failed: {}", e);
            error_response(e, StatusCode::BAD_REQUEST)
        }
    }
}

async fn handle_get_orders(
    Extension(bus): Extension<Arc<CommandBus>>,
) -> (StatusCode, Json<Value>) {
    tracing::info!("getOrders request received, forwarding over the bus");

    match bus
        .request(CHANNEL_GET_ORDERS, Value::Null, BUS_REQUEST_TIMEOUT)
        .await
    {
        Ok(reply) => (StatusCode::OK, Json(reply)),
        Err(e) => {
            tracing::warn!("getOrders request failed: {}", e);
            error_response(e, StatusCode::NOT_FOUND)
        }
    }
}

fn error_response(e: BusError, handler_failed_status: StatusCode) -> (StatusCode, Json<Value>) {
    let status = match e {
        BusError::NoHandlerAvailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        BusError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        BusError::Transport(_) => StatusCode::BAD_GATEWAY,
        BusError::HandlerFailed(_) => handler_failed_status,
    };

    (status, Json(json!({ "message": e.to_string() })))
}
