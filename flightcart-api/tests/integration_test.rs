mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use common::{cart_item, offer, state_with, FakeSupplier};
use flightcart_api::app;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder().method("DELETE").uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_health() {
    let app = app(state_with(FakeSupplier::with_offers(vec![])));
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_cart_add_list_remove_flow() {
    let app = app(state_with(FakeSupplier::with_offers(vec![])));

    let (status, body) = send(&app, get("/cart")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "cart": [] }));

    let (status, body) = send(&app, post_json("/cart", &cart_item("Delta", 350.0, 2, 1))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let cart = body["cart"].as_array().unwrap();
    assert_eq!(cart.len(), 1);
    let first_id = cart[0]["id"].as_str().unwrap().to_string();
    assert!(!first_id.is_empty());
    assert_eq!(cart[0]["totalPrice"], 1050.0);
    assert_eq!(cart[0]["passengerAdults"], 2);

    let (_, body) = send(&app, post_json("/cart", &cart_item("United", 120.5, 1, 0))).await;
    assert_eq!(body["cart"].as_array().unwrap().len(), 2);

    let (status, body) = send(&app, delete(&format!("/cart/{}", first_id))).await;
    assert_eq!(status, StatusCode::OK);
    let cart = body["cart"].as_array().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["airline"], "United");

    let (_, body) = send(&app, get("/cart")).await;
    assert_eq!(body["cart"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_client_supplied_id_is_kept() {
    let app = app(state_with(FakeSupplier::with_offers(vec![])));
    let mut item = cart_item("KLM", 99.0, 1, 0);
    item["id"] = json!("chosen-by-client");

    let (_, body) = send(&app, post_json("/cart", &item)).await;
    assert_eq!(body["cart"][0]["id"], "chosen-by-client");

    let (status, body) = send(&app, delete("/cart/chosen-by-client")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cart"], json!([]));
}

#[tokio::test]
async fn test_remove_unknown_item_is_not_found() {
    let app = app(state_with(FakeSupplier::with_offers(vec![])));
    send(&app, post_json("/cart", &cart_item("Delta", 100.0, 1, 0))).await;

    let (status, body) = send(&app, delete("/cart/does-not-exist")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "success": false, "error": "Item not found" }));

    let (_, body) = send(&app, get("/cart")).await;
    assert_eq!(body["cart"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_clear_cart() {
    let app = app(state_with(FakeSupplier::with_offers(vec![])));
    send(&app, post_json("/cart", &cart_item("A", 10.0, 1, 0))).await;
    send(&app, post_json("/cart", &cart_item("B", 20.0, 1, 0))).await;

    let (status, body) = send(&app, delete("/cart")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true, "cart": [] }));

    let (_, body) = send(&app, get("/cart")).await;
    assert_eq!(body["cart"], json!([]));
}

#[tokio::test]
async fn test_add_rejects_non_object_body() {
    let app = app(state_with(FakeSupplier::with_offers(vec![])));
    let (status, body) = send(&app, post_json("/cart", &json!("not an item"))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, get("/cart")).await;
    assert_eq!(body["cart"], json!([]));
}

#[tokio::test]
async fn test_search_returns_offers_with_travel_class() {
    let supplier = FakeSupplier::with_offers(vec![offer("Delta", 350), offer("United", 280)]);
    let app = app(state_with(supplier.clone()));

    let (status, body) = send(
        &app,
        get("/flights?from=jfk&to=LAX&departure=2025-06-01&adults=2&travel_class=3"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 2);
    assert_eq!(body["flights"][0]["travel_class"], 3);
    assert_eq!(body["flights"][1]["price"], 280);

    let requests = supplier.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].departure_id, "JFK");
    assert_eq!(requests[0].arrival_id, "LAX");
    assert_eq!(requests[0].adults, 2);
    assert_eq!(requests[0].travel_class, 3);
}

#[tokio::test]
async fn test_oneway_search_ignores_return_date() {
    let supplier = FakeSupplier::with_offers(vec![offer("Delta", 350)]);
    let app = app(state_with(supplier.clone()));

    let (status, _) = send(
        &app,
        get("/flights?from=JFK&to=LAX&departure=2025-06-01&returnDate=2025-06-10&tripType=oneway"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(supplier.requests.lock().unwrap()[0].return_date, None);
}

#[tokio::test]
async fn test_oneway_search_tolerates_stale_return_date() {
    let supplier = FakeSupplier::with_offers(vec![offer("Delta", 350)]);
    let app = app(state_with(supplier.clone()));

    let (status, body) = send(
        &app,
        get("/flights?from=JFK&to=LAX&departure=2025-06-01&returnDate=whenever"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(supplier.requests.lock().unwrap()[0].return_date, None);
}

#[tokio::test]
async fn test_passengers_counts_children_once() {
    let supplier = FakeSupplier::with_offers(vec![]);
    let app = app(state_with(supplier.clone()));

    let (status, _) = send(
        &app,
        get("/flights?from=JFK&to=LAX&departure=2025-06-01&passengers=3&children=1"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let requests = supplier.requests.lock().unwrap();
    assert_eq!(requests[0].adults, 2);
    assert_eq!(requests[0].children, 1);
}

#[tokio::test]
async fn test_round_trip_forwards_return_date() {
    let supplier = FakeSupplier::with_offers(vec![]);
    let app = app(state_with(supplier.clone()));

    let (status, body) = send(
        &app,
        get("/flights?from=JFK&to=LAX&departure=2025-06-01&returnDate=2025-06-10&tripType=round"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
    assert_eq!(
        supplier.requests.lock().unwrap()[0].return_date.as_deref(),
        Some("2025-06-10")
    );
}

#[tokio::test]
async fn test_malformed_offers_are_dropped() {
    let supplier = FakeSupplier::with_offers(vec![
        offer("Delta", 350),
        json!({ "flights": [], "price": 99 }),
        json!("garbage"),
    ]);
    let app = app(state_with(supplier));

    let (status, body) =
        send(&app, get("/flights?from=JFK&to=LAX&departure=2025-06-01")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["flights"][0]["price"], 350);
}

#[tokio::test]
async fn test_invalid_search_never_reaches_upstream() {
    let supplier = FakeSupplier::with_offers(vec![offer("Delta", 350)]);
    let app = app(state_with(supplier.clone()));

    for uri in [
        "/flights?to=LAX&departure=2025-06-01",
        "/flights?from=JFK&to=LAX&departure=June%201st",
        "/flights?from=JFK&to=LAX&departure=2025-06-01&tripType=round",
        "/flights?from=JFK&to=LAX&departure=2025-06-01&adults=0",
        "/flights?from=JFK&to=LAX&departure=2025-06-01&travel_class=7",
    ] {
        let (status, body) = send(&app, get(uri)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Invalid search parameters");
    }
    assert_eq!(supplier.calls(), 0);
}

#[tokio::test]
async fn test_upstream_failure_is_reported() {
    let app = app(state_with(FakeSupplier::unavailable()));

    let (status, body) =
        send(&app, get("/flights?from=JFK&to=LAX&departure=2025-06-01")).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to fetch flights");
    assert_eq!(body["details"], "connection refused");
}
