//! Order Store Bus Protocol
//!
//! Channel names and the Data Transfer Objects exchanged over the bus with
//! the order store. Field names on the wire follow the external JSON contract
//! (`orderId`, `orderName`, `orderDate`).

use serde::{Deserialize, Serialize};

/// Channel for appending one order to the collection.
pub const CHANNEL_ADD_ORDER: &str = "addOrder";
/// Channel for reading the full collection.
pub const CHANNEL_GET_ORDERS: &str = "getOrders";

/// Default location of the backing document.
pub const DEFAULT_ORDERS_FILE: &str = "orders.json";

/// One order record. All fields are caller-supplied strings: no type
/// validation, no uniqueness check, and absent fields default to empty
/// strings rather than aborting the command. Immutable once appended.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "orderId", default)]
    pub order_id: String,
    #[serde(rename = "orderName", default)]
    pub order_name: String,
    #[serde(rename = "orderDate", default)]
    pub order_date: String,
}

/// Reply for `addOrder`. Failures below the bus boundary surface here as a
/// flag, never as a bus-level error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddOrderReply {
    pub error: bool,
    pub message: String,
}

impl AddOrderReply {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
        }
    }
}

/// Reply for `getOrders`.
///
/// "No data yet" (missing or unreadable document) is deliberately distinct
/// from "empty collection": an empty array document yields `Orders([])`, a
/// missing one yields `NotFound`. Untagged, so the wire shape is either the
/// plain array or a `{"message": ...}` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GetOrdersReply {
    Orders(Vec<Order>),
    NotFound { message: String },
}
