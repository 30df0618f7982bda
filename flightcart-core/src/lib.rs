pub mod models;
pub mod pricing;
pub mod repository;
pub mod search;
pub mod supplier;

pub use models::{AirportTime, CartItem, Itinerary, Leg, TravelClass};
pub use repository::CartRepository;
pub use search::{SearchQuery, TripType, UpstreamRequest, UpstreamSettings};
pub use supplier::FlightSupplier;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Upstream provider unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("Malformed offer: {0}")]
    MalformedOffer(String),
    #[error("Cart item not found: {0}")]
    CartItemNotFound(String),
    #[error("Invalid search parameters: {0}")]
    InvalidSearchParameters(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
