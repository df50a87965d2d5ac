//! Bus handler registration for the order store.
//!
//! Binds `addOrder` and `getOrders` to a store instance. Both handlers always
//! produce a reply payload: store-level failures travel inside the reply (the
//! `error` flag or the `NotFound` variant), so a `HandlerFailed` on these
//! channels can only mean the reply itself failed to serialize.

use super::orders::OrderStore;
use super::protocol::{CHANNEL_ADD_ORDER, CHANNEL_GET_ORDERS, Order};
use crate::bus::{CommandBus, HandlerError};

use std::sync::Arc;

pub async fn register_store_handlers(bus: &CommandBus, store: Arc<OrderStore>) {
    let add_store = store.clone();
    bus.register_handler(CHANNEL_ADD_ORDER, move |payload| {
        let store = add_store.clone();
        async move {
            // Lenient by contract: absent fields default to empty strings,
            // and a payload that is not an object at all becomes an empty
            // order rather than a rejection.
            let order: Order = serde_json::from_value(payload).unwrap_or_default();
            let reply = store.add_order(order).await;
            serde_json::to_value(&reply).map_err(|e| HandlerError::new(e.to_string()))
        }
    })
    .await;

    bus.register_handler(CHANNEL_GET_ORDERS, move |_payload| {
        let store = store.clone();
        async move {
            let reply = store.list_orders().await;
            serde_json::to_value(&reply).map_err(|e| HandlerError::new(e.to_string()))
        }
    })
    .await;
}
