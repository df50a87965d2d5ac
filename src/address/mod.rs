//! Advertise-Address Selection
//!
//! A node joining the cluster must publish exactly one IPv4 address other
//! nodes can reach it on. This module enumerates the local interfaces and
//! applies the selection rule: keep IPv4, drop loopback, drop 10.x, take the
//! first survivor in enumeration order.
//!
//! The filter itself is a pure function over a supplied candidate list, so
//! tests never depend on host networking; only `resolve_advertise_ip` touches
//! the OS.

pub mod resolver;

#[cfg(test)]
mod tests;

pub use resolver::{resolve_advertise_ip, select_advertise_ip};
