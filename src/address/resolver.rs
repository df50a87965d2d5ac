use std::net::{IpAddr, Ipv4Addr};

/// Applies the advertise-address selection rule to a list of candidates.
///
/// Keeps IPv4 only, drops loopback, drops any address whose first octet is 10
/// (coarse private-class-A heuristic; class B/C private ranges are accepted
/// as "public enough"), and returns the first survivor in input order. No
/// sorting, no priority scoring.
pub fn select_advertise_ip<I>(candidates: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = IpAddr>,
{
    candidates
        .into_iter()
        .filter_map(|addr| match addr {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(_) => None,
        })
        .find(|v4| !v4.is_loopback() && v4.octets()[0] != 10)
}

/// Enumerates the local network interfaces and selects the address this node
/// should advertise for cluster membership.
///
/// Returns `None` when enumeration fails or no address survives the filter.
/// Callers must treat `None` as fatal for cluster formation; it is never a
/// value to propagate over the bus.
pub fn resolve_advertise_ip() -> Option<Ipv4Addr> {
    let interfaces = match if_addrs::get_if_addrs() {
        Ok(interfaces) => interfaces,
        Err(e) => {
            tracing::error!("Failed to enumerate network interfaces: {}", e);
            return None;
        }
    };

    // Enumeration order is whatever the OS reports; the design accepts that
    // as a known source of nondeterminism.
    select_advertise_ip(interfaces.iter().map(|iface| iface.addr.ip()))
}
