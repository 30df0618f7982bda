pub mod app_config;
pub mod cart_repo;
pub mod serpapi;

pub use cart_repo::InMemoryCartRepository;
pub use serpapi::SerpApiClient;
