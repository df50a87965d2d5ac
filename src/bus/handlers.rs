//! Inbound delivery endpoint.
//!
//! Every bus node mounts this router so peers can deliver commands to its
//! locally registered handlers. Handler failures travel back in the response
//! body, not as HTTP errors; a 404 means the channel is not registered here.
//! Fire-and-forget deliveries (`expects_reply: false`) run the handler but
//! carry no reply payload back.

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    routing::post,
};
use std::sync::Arc;

use super::protocol::{DeliverRequest, DeliverResponse, ENDPOINT_DELIVER};
use super::registry::ChannelRegistry;

/// Builds the router exposing `/bus/deliver` over the given handler table.
pub fn router(registry: Arc<ChannelRegistry>) -> Router {
    Router::new()
        .route(ENDPOINT_DELIVER, post(handle_deliver))
        .layer(Extension(registry))
}

pub async fn handle_deliver(
    Extension(registry): Extension<Arc<ChannelRegistry>>,
    Json(request): Json<DeliverRequest>,
) -> (StatusCode, Json<DeliverResponse>) {
    tracing::debug!(
        "Delivering command {} on channel '{}'",
        request.correlation_id,
        request.channel
    );

    match registry.invoke(&request.channel, request.payload).await {
        None => {
            tracing::warn!("No handler registered for channel '{}'", request.channel);
            (
                StatusCode::NOT_FOUND,
                Json(DeliverResponse {
                    correlation_id: request.correlation_id,
                    payload: None,
                    error: Some(format!(
                        "no handler registered for channel '{}'",
                        request.channel
                    )),
                }),
            )
        }
        // Fire-and-forget: the sender has already stopped listening, so the
        // handler's outcome stays local (failures are only logged).
        Some(outcome) if !request.expects_reply => {
            if let Err(e) = outcome {
                tracing::warn!(
                    "Fire-and-forget command {} on '{}' failed in handler: {}",
                    request.correlation_id,
                    request.channel,
                    e
                );
            }
            (
                StatusCode::OK,
                Json(DeliverResponse {
                    correlation_id: request.correlation_id,
                    payload: None,
                    error: None,
                }),
            )
        }
        Some(Ok(reply)) => (
            StatusCode::OK,
            Json(DeliverResponse {
                correlation_id: request.correlation_id,
                payload: Some(reply),
                error: None,
            }),
        ),
        Some(Err(e)) => (
            StatusCode::OK,
            Json(DeliverResponse {
                correlation_id: request.correlation_id,
                payload: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}
