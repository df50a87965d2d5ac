//! Channel Handler Registry
//!
//! Maps logical channel names (e.g. "addOrder") to executable async
//! closures. One handler per channel per process; registering a channel a
//! second time replaces the previous handler.

use super::error::HandlerError;

use dashmap::DashMap;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Type alias for a thread-safe, asynchronous channel handler.
/// It takes the command payload and returns a Future resolving to the reply
/// payload or a handler error.
pub type BusHandlerFn = Arc<
    dyn Fn(Value) -> Pin<Box<dyn Future<Output = Result<Value, HandlerError>> + Send>>
        + Send
        + Sync,
>;

/// Registry holding the mapping between channel names and their handlers.
pub struct ChannelRegistry {
    handlers: DashMap<String, BusHandlerFn>,
}

impl ChannelRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            handlers: DashMap::new(),
        })
    }

    /// Registers a handler under a channel name, replacing any previous one.
    pub fn register<F, Fut>(&self, channel: &str, handler: F)
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        // Box::pin type-erases the concrete Future so handlers with
        // different bodies share one map.
        let handler_fn: BusHandlerFn = Arc::new(move |payload: Value| {
            Box::pin(handler(payload))
                as Pin<Box<dyn Future<Output = Result<Value, HandlerError>> + Send>>
        });

        if self.handlers.insert(channel.to_string(), handler_fn).is_some() {
            tracing::info!("Replaced handler on channel: {}", channel);
        } else {
            tracing::info!("Registered handler on channel: {}", channel);
        }
    }

    /// Looks up the handler for `channel` and runs it with `payload`.
    ///
    /// # Returns
    /// * `None` if no handler is registered for the channel.
    /// * `Some(Ok(reply))` / `Some(Err(_))` with the handler's outcome.
    pub async fn invoke(&self, channel: &str, payload: Value) -> Option<Result<Value, HandlerError>> {
        // Clone the Arc out of the map guard before awaiting.
        let handler_fn = self.handlers.get(channel).map(|entry| entry.value().clone())?;

        tracing::debug!("Invoking handler on channel '{}'", channel);
        Some(handler_fn(payload).await)
    }

    /// Checks if a handler is registered for the channel.
    pub fn has_handler(&self, channel: &str) -> bool {
        self.handlers.contains_key(channel)
    }

    /// Returns a list of all registered channel names.
    pub fn list_channels(&self) -> Vec<String> {
        self.handlers
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Returns the total number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }
}
