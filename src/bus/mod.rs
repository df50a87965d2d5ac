//! Command Bus Module
//!
//! A cluster-wide request/reply and fire-and-forget messaging primitive
//! addressed by logical channel name (`addOrder`, `getOrders`), never by node
//! identity. Every command is consumed by exactly one live handler: the bus
//! looks up which alive members advertise the channel (via membership
//! gossip), picks one with the configured delivery strategy, and either
//! invokes the local handler directly or POSTs the command to the chosen
//! node's `/bus/deliver` endpoint.
//!
//! ## Guarantees (and non-guarantees)
//! - Exactly one handler instance services any given command; no broadcast.
//! - No ordering between independent requests; each carries its own
//!   correlation id.
//! - The bus never serializes handler invocations on the caller's behalf;
//!   if a handler needs a critical section, that is the handler's job.
//! - A timed-out request is "outcome unknown": the handler may still have
//!   run to completion.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod registry;
pub mod service;

#[cfg(test)]
mod tests;

pub use error::{BusError, HandlerError};
pub use registry::ChannelRegistry;
pub use service::{CommandBus, DeliveryStrategy};
