//! Address Resolver Tests
//!
//! Exercises the pure selection rule against fixed candidate lists, so the
//! outcome never depends on the host's interfaces.

use super::select_advertise_ip;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

fn v4(a: u8, b: u8, c: u8, d: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(a, b, c, d))
}

#[test]
fn test_picks_first_public_enough_address() {
    // Loopback and 10.x are filtered; the 192.168 address survives.
    let candidates = vec![v4(127, 0, 0, 1), v4(10, 0, 0, 5), v4(192, 168, 1, 20)];

    let selected = select_advertise_ip(candidates);
    assert_eq!(selected, Some(Ipv4Addr::new(192, 168, 1, 20)));
}

#[test]
fn test_no_survivors_yields_none() {
    let candidates = vec![v4(127, 0, 0, 1), v4(10, 0, 0, 5), v4(10, 1, 2, 3)];

    assert_eq!(select_advertise_ip(candidates), None);
}

#[test]
fn test_ipv6_is_ignored() {
    let candidates = vec![
        IpAddr::V6(Ipv6Addr::LOCALHOST),
        IpAddr::V6("fe80::1".parse().unwrap()),
        v4(172, 16, 0, 9),
    ];

    let selected = select_advertise_ip(candidates);
    assert_eq!(selected, Some(Ipv4Addr::new(172, 16, 0, 9)));
}

#[test]
fn test_first_match_wins_in_input_order() {
    // No scoring: 192.168.1.20 comes before 172.16.0.9, so it wins even
    // though both survive the filter.
    let candidates = vec![v4(192, 168, 1, 20), v4(172, 16, 0, 9)];
    assert_eq!(
        select_advertise_ip(candidates),
        Some(Ipv4Addr::new(192, 168, 1, 20))
    );

    let reversed = vec![v4(172, 16, 0, 9), v4(192, 168, 1, 20)];
    assert_eq!(
        select_advertise_ip(reversed),
        Some(Ipv4Addr::new(172, 16, 0, 9))
    );
}

#[test]
fn test_class_b_and_c_private_ranges_are_accepted() {
    // The 10.x exclusion is intentionally coarse: other private ranges pass.
    assert_eq!(
        select_advertise_ip(vec![v4(172, 16, 0, 1)]),
        Some(Ipv4Addr::new(172, 16, 0, 1))
    );
    assert_eq!(
        select_advertise_ip(vec![v4(192, 168, 0, 1)]),
        Some(Ipv4Addr::new(192, 168, 0, 1))
    );
}

#[test]
fn test_empty_candidate_list() {
    assert_eq!(select_advertise_ip(Vec::<IpAddr>::new()), None);
}
