//! Bus Wire Protocol
//!
//! Defines the endpoint and Data Transfer Objects used to deliver a command
//! to a handler on a remote node. Commands are serialized as JSON and sent
//! over HTTP; the HTTP response carries the reply for request/reply calls.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Endpoint every bus node exposes for inbound command delivery.
pub const ENDPOINT_DELIVER: &str = "/bus/deliver";

/// A command in flight to a single remote handler.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeliverRequest {
    /// Logical channel name the command is addressed to.
    pub channel: String,
    /// Unique id tying this request to its reply in logs on both ends.
    pub correlation_id: String,
    /// Opaque command payload; `Value::Null` when the channel takes none.
    pub payload: Value,
    /// `false` for fire-and-forget sends; the handler still runs, but the
    /// sender has already stopped listening.
    pub expects_reply: bool,
}

/// The handler's reply (or failure) for one delivered command.
///
/// Exactly one of `payload` / `error` is set: a present `error` maps to
/// `BusError::HandlerFailed` on the calling side.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeliverResponse {
    pub correlation_id: String,
    pub payload: Option<Value>,
    pub error: Option<String>,
}
