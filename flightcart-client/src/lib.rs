pub mod api;
pub mod cache;

pub use api::{CartApi, HttpCartApi};
pub use cache::CartCache;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}
