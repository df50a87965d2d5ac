//! Gateway Tests
//!
//! Runs the real router against a real listener and drives it with an HTTP
//! client, with the store handlers registered on the same in-process bus.

use crate::bus::CommandBus;
use crate::membership::service::MembershipService;
use crate::store::OrderStore;
use crate::store::handlers::register_store_handlers;

use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;

fn loopback() -> SocketAddr {
    "127.0.0.1:0".parse().unwrap()
}

async fn serve(bus: Arc<CommandBus>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = super::router(bus);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn founder_bus() -> Arc<CommandBus> {
    let membership = MembershipService::new(loopback(), loopback(), vec![])
        .await
        .unwrap();
    CommandBus::new(membership)
}

#[tokio::test]
async fn test_add_and_get_orders_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let orders_file = dir.path().join("orders.json");
    std::fs::write(&orders_file, "[]").unwrap();

    let bus = founder_bus().await;
    register_store_handlers(&bus, OrderStore::new(&orders_file)).await;
    let base = serve(bus).await;

    let client = reqwest::Client::new();

    let add: Value = client
        .post(format!("{}/add-order", base))
        .json(&json!({"orderId": "1", "orderName": "Widget", "orderDate": "2024-01-01"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(add["error"], json!(false));

    let response = client
        .get(format!("{}/get-orders", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let orders: Value = response.json().await.unwrap();
    assert_eq!(
        orders,
        json!([{"orderId": "1", "orderName": "Widget", "orderDate": "2024-01-01"}])
    );
}

#[tokio::test]
async fn test_missing_store_node_maps_to_503() {
    // A bus with no registered channels: every request must fail with
    // NoHandlerAvailable, which the gateway maps to Service Unavailable.
    let bus = founder_bus().await;
    let base = serve(bus).await;

    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/add-order", base))
        .json(&json!({"orderId": "1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);

    let response = client
        .get(format!("{}/get-orders", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_missing_orders_file_replies_with_message_body() {
    let dir = tempfile::tempdir().unwrap();
    // No seeding: the document does not exist yet.
    let orders_file = dir.path().join("orders.json");

    let bus = founder_bus().await;
    register_store_handlers(&bus, OrderStore::new(&orders_file)).await;
    let base = serve(bus).await;

    let client = reqwest::Client::new();

    // The store replies in-band, so this is a 200 with a message object,
    // distinguishable from the empty collection `[]`.
    let response = client
        .get(format!("{}/get-orders", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"message": "order list not found"}));

    let add_response = client
        .post(format!("{}/add-order", base))
        .json(&json!({"orderId": "1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(add_response.status(), reqwest::StatusCode::OK);

    let add_body: Value = add_response.json().await.unwrap();
    assert_eq!(add_body["error"], json!(true));
}

#[tokio::test]
async fn test_greeting() {
    let bus = founder_bus().await;
    let base = serve(bus).await;

    let body = reqwest::get(base).await.unwrap().text().await.unwrap();
    assert!(body.starts_with("Welcome"));
}
