//! Order Store Module
//!
//! Owns the durable collection of order records: a single JSON-array document
//! that no other component reads or writes directly. Access is funneled
//! through the bus channels `addOrder` and `getOrders`.
//!
//! ## The invariant this module exists for
//! Every write is a read-modify-write of the whole document. Two concurrent
//! appends that both read the same prior state would each overwrite the
//! other's insert, so the store serializes the full cycle behind the write
//! half of an `RwLock` scoped to the store instance. Reads take the read
//! half. Writes replace the document atomically (temp file + rename), so a
//! reader can never observe a partially written file.

pub mod handlers;
pub mod orders;
pub mod protocol;


pub use orders::OrderStore;
pub use protocol::{CHANNEL_ADD_ORDER, CHANNEL_GET_ORDERS, Order};
