#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use flightcart_api::AppState;
use flightcart_core::{CoreError, CoreResult, FlightSupplier, UpstreamRequest, UpstreamSettings};
use flightcart_store::InMemoryCartRepository;
use serde_json::{json, Value};

/// Supplier double that replays a canned answer and records every request.
pub struct FakeSupplier {
    offers: Option<Vec<Value>>,
    pub requests: Mutex<Vec<UpstreamRequest>>,
}

impl FakeSupplier {
    pub fn with_offers(offers: Vec<Value>) -> Arc<Self> {
        Arc::new(Self { offers: Some(offers), requests: Mutex::new(Vec::new()) })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self { offers: None, requests: Mutex::new(Vec::new()) })
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl FlightSupplier for FakeSupplier {
    async fn search(&self, request: &UpstreamRequest) -> CoreResult<Vec<Value>> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.offers {
            Some(offers) => Ok(offers.clone()),
            None => Err(CoreError::UpstreamUnavailable("connection refused".to_string())),
        }
    }
}

pub fn state_with(supplier: Arc<FakeSupplier>) -> AppState {
    AppState {
        cart: Arc::new(InMemoryCartRepository::new()),
        supplier,
        upstream: UpstreamSettings::default(),
    }
}

pub fn offer(airline: &str, price: u64) -> Value {
    json!({
        "flights": [{
            "airline": airline,
            "flight_number": "DL 100",
            "departure_airport": { "id": "JFK", "time": "2025-06-01 08:15" },
            "arrival_airport": { "id": "LAX", "time": "2025-06-01 11:40" },
            "duration": 325,
            "airplane": "Boeing 737"
        }],
        "total_duration": 325,
        "price": price
    })
}

pub fn cart_item(airline: &str, price: f64, adults: u32, children: u32) -> Value {
    json!({
        "airline": airline,
        "legs": [],
        "basePrice": price,
        "totalDurationMinutes": 325,
        "travelClass": 1,
        "passengerAdults": adults,
        "passengerChildren": children,
        "totalPrice": price * f64::from(adults + children)
    })
}
