use flightcart_core::CartItem;
use serde_json::Value;
use tracing::warn;

use crate::normalizer::normalize_batch;

/// Normalizes and prices a result list for a party.
///
/// Each quote is a cart candidate without an id; selecting one means handing
/// it to the cart unchanged. Malformed offers, and offers whose fare cannot
/// be priced for the party, are dropped.
pub fn quote_offers(offers: &[Value], adults: u32, children: u32) -> Vec<CartItem> {
    normalize_batch(offers)
        .into_iter()
        .filter_map(|itinerary| match CartItem::new(itinerary, adults, children) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!("Dropping quote: {}", e);
                None
            }
        })
        .collect()
}
