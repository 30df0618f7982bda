use std::sync::Arc;

use flightcart_core::{CartRepository, FlightSupplier, UpstreamSettings};

/// Shared handles for every request handler. Built once in `main`; the cart
/// lives exactly as long as the process.
#[derive(Clone)]
pub struct AppState {
    pub cart: Arc<dyn CartRepository>,
    pub supplier: Arc<dyn FlightSupplier>,
    pub upstream: UpstreamSettings,
}
