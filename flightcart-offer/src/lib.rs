pub mod display;
pub mod normalizer;
pub mod quote;

pub use normalizer::{extract_time, normalize, normalize_batch};
pub use quote::quote_offers;
