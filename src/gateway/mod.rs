//! Gateway Module
//!
//! The HTTP front door. Thin by design: every route translates one inbound
//! request into one bus request and the bus outcome into a status code.
//! Session handling and credentials are deliberately absent (the original
//! system's login channel is out of scope for this core).

pub mod handlers;

#[cfg(test)]
mod tests;

pub use handlers::router;
