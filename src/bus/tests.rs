//! Command Bus Tests
//!
//! Covers the handler registry, the local request path (success, handler
//! failure, timeout, missing handler), the delivery strategy, and one
//! two-node request over real loopback HTTP.

use super::error::{BusError, HandlerError};
use super::registry::ChannelRegistry;
use super::service::{CommandBus, DeliveryStrategy};
use crate::membership::service::MembershipService;

use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time::{Duration, Instant};

fn loopback() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

async fn founder_bus() -> Arc<CommandBus> {
    let membership = MembershipService::new(loopback(), loopback(), vec![])
        .await
        .unwrap();
    CommandBus::new(membership)
}

// ============================================================
// REGISTRY TESTS
// ============================================================

#[tokio::test]
async fn test_registry_register_and_invoke() {
    let registry = ChannelRegistry::new();
    registry.register("echo", |payload| async move { Ok(payload) });

    assert!(registry.has_handler("echo"));
    assert_eq!(registry.handler_count(), 1);

    let result = registry.invoke("echo", json!({"k": "v"})).await;
    assert_eq!(result, Some(Ok(json!({"k": "v"}))));
}

#[tokio::test]
async fn test_registry_unknown_channel_yields_none() {
    let registry = ChannelRegistry::new();
    assert!(registry.invoke("nope", Value::Null).await.is_none());
}

#[tokio::test]
async fn test_registry_reregister_replaces_handler() {
    let registry = ChannelRegistry::new();
    registry.register("version", |_| async move { Ok(json!("one")) });
    registry.register("version", |_| async move { Ok(json!("two")) });

    assert_eq!(registry.handler_count(), 1);
    let result = registry.invoke("version", Value::Null).await;
    assert_eq!(result, Some(Ok(json!("two"))));
}

// ============================================================
// DELIVERY STRATEGY
// ============================================================

#[test]
fn test_round_robin_cycles_through_targets() {
    let counter = AtomicUsize::new(0);
    let strategy = DeliveryStrategy::RoundRobin;

    let picks: Vec<usize> = (0..6).map(|_| strategy.pick(3, &counter)).collect();
    assert_eq!(picks, vec![0, 1, 2, 0, 1, 2]);
}

#[test]
fn test_random_stays_in_range() {
    let counter = AtomicUsize::new(0);
    let strategy = DeliveryStrategy::Random;

    for _ in 0..100 {
        assert!(strategy.pick(4, &counter) < 4);
    }
}

// ============================================================
// LOCAL REQUEST PATH
// ============================================================

#[tokio::test]
async fn test_request_unregistered_channel_fails_fast() {
    let bus = founder_bus().await;

    let started = Instant::now();
    let result = bus
        .request("missing", Value::Null, Duration::from_secs(5))
        .await;

    assert_eq!(
        result,
        Err(BusError::NoHandlerAvailable("missing".to_string()))
    );
    // Must not burn the whole timeout budget just to find out nobody serves
    // the channel.
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[tokio::test]
async fn test_request_local_roundtrip() {
    let bus = founder_bus().await;
    bus.register_handler("echo", |payload| async move { Ok(payload) })
        .await;

    let reply = bus
        .request("echo", json!({"orderId": "1"}), Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(reply, json!({"orderId": "1"}));
}

#[tokio::test]
async fn test_request_handler_failure_is_forwarded() {
    let bus = founder_bus().await;
    bus.register_handler("explode", |_| async move {
        Err::<Value, _>(HandlerError::new("boom"))
    })
    .await;

    let result = bus.request("explode", Value::Null, Duration::from_secs(1)).await;
    assert_eq!(result, Err(BusError::HandlerFailed("boom".to_string())));
}

#[tokio::test]
async fn test_request_slow_handler_times_out() {
    let bus = founder_bus().await;
    bus.register_handler("slow", |_| async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        Ok(Value::Null)
    })
    .await;

    let result = bus
        .request("slow", Value::Null, Duration::from_millis(50))
        .await;
    assert_eq!(result, Err(BusError::Timeout("slow".to_string())));
}

#[tokio::test]
async fn test_send_fire_and_forget_reaches_local_handler() {
    let bus = founder_bus().await;

    let (tx, mut rx) = tokio::sync::mpsc::channel::<Value>(1);
    bus.register_handler("notify", move |payload| {
        let tx = tx.clone();
        async move {
            let _ = tx.send(payload).await;
            Ok(Value::Null)
        }
    })
    .await;

    bus.send("notify", json!({"ping": true}));

    let received = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("Send should reach the handler")
        .unwrap();
    assert_eq!(received, json!({"ping": true}));
}

// ============================================================
// DELIVER ENDPOINT
// ============================================================

#[tokio::test]
async fn test_deliver_reply_payload_follows_expects_reply() {
    use super::handlers::handle_deliver;
    use super::protocol::DeliverRequest;
    use axum::{Json, extract::Extension, http::StatusCode};

    let registry = ChannelRegistry::new();
    registry.register("echo", |payload| async move { Ok(payload) });

    let request = |expects_reply: bool| DeliverRequest {
        channel: "echo".to_string(),
        correlation_id: "cid-1".to_string(),
        payload: json!({"k": "v"}),
        expects_reply,
    };

    let (status, Json(reply)) =
        handle_deliver(Extension(registry.clone()), Json(request(true))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply.payload, Some(json!({"k": "v"})));

    // Fire-and-forget: the handler runs, but no reply body is built.
    let (status, Json(reply)) =
        handle_deliver(Extension(registry), Json(request(false))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply.payload, None);
    assert_eq!(reply.error, None);
}

// ============================================================
// REMOTE REQUEST PATH (two nodes over loopback)
// ============================================================

#[tokio::test]
async fn test_request_routed_to_remote_handler() {
    // Node B: seed, serves "greet" behind a real deliver endpoint.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let bus_addr = listener.local_addr().unwrap();

    let membership_b = MembershipService::new(loopback(), bus_addr, vec![])
        .await
        .unwrap();
    let seed_gossip = membership_b.local_node.gossip_addr;
    membership_b.clone().start().await;

    let bus_b = CommandBus::new(membership_b);
    bus_b
        .register_handler("greet", |payload| async move {
            Ok(json!({ "greeting": format!("hello {}", payload["name"].as_str().unwrap_or("?")) }))
        })
        .await;

    let app = super::handlers::router(bus_b.registry());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Node A: joins via B, has no handlers of its own.
    let membership_a = MembershipService::new(loopback(), loopback(), vec![seed_gossip])
        .await
        .unwrap();
    membership_a.clone().start().await;
    membership_a
        .wait_ready(Duration::from_secs(5))
        .await
        .expect("Joiner should become ready");

    let bus_a = CommandBus::new(membership_a);

    let reply = bus_a
        .request("greet", json!({"name": "cluster"}), Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(reply, json!({"greeting": "hello cluster"}));
}
