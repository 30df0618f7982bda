use async_trait::async_trait;
use serde_json::Value;

use crate::search::UpstreamRequest;
use crate::CoreResult;

/// Top-level keys the provider may put its offer list under, in priority order.
pub const OFFER_LIST_KEYS: &[&str] = &["best_flights", "other_flights", "flights"];

/// The first array found under [`OFFER_LIST_KEYS`], or nothing.
pub fn extract_offers(response: &Value) -> Vec<Value> {
    OFFER_LIST_KEYS
        .iter()
        .find_map(|key| response.get(*key).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}

/// Upstream flight search provider.
#[async_trait]
pub trait FlightSupplier: Send + Sync {
    /// Raw, unnormalized offers. Any transport or provider failure is
    /// `UpstreamUnavailable`; there is no retry.
    async fn search(&self, request: &UpstreamRequest) -> CoreResult<Vec<Value>>;
}
