use async_trait::async_trait;
use chrono::Utc;
use flightcart_core::{CartItem, CartRepository, CoreError, CoreResult};
use rand::distributions::Alphanumeric;
use rand::Rng;
use tokio::sync::RwLock;
use tracing::info;

const ID_SUFFIX_LEN: usize = 7;

/// Process-lifetime cart. Everything is lost on restart.
///
/// Each operation holds the lock for its whole read-modify-write, so
/// concurrent adds never lose an item and two removes of the same id see
/// exactly one success.
#[derive(Default)]
pub struct InMemoryCartRepository {
    items: RwLock<Vec<CartItem>>,
}

impl InMemoryCartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `{unix millis}-{7 random base36 chars}`; unique in practice, not by proof.
pub fn generate_item_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("{}-{}", Utc::now().timestamp_millis(), suffix)
}

#[async_trait]
impl CartRepository for InMemoryCartRepository {
    async fn add(&self, item: CartItem) -> CoreResult<Vec<CartItem>> {
        let item = if item.id().is_some() {
            item
        } else {
            item.with_id(generate_item_id())
        };

        let mut items = self.items.write().await;
        info!(
            "Added to cart: {} ({}, {} legs)",
            item.id().unwrap_or_default(),
            item.itinerary.airline,
            item.itinerary.legs.len()
        );
        items.push(item);
        Ok(items.clone())
    }

    async fn list(&self) -> CoreResult<Vec<CartItem>> {
        Ok(self.items.read().await.clone())
    }

    async fn remove(&self, id: &str) -> CoreResult<Vec<CartItem>> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.id() == Some(id))
            .ok_or_else(|| CoreError::CartItemNotFound(id.to_string()))?;

        let removed = items.remove(index);
        info!("Removed from cart: {} ({})", id, removed.itinerary.airline);
        Ok(items.clone())
    }

    async fn clear(&self) -> CoreResult<usize> {
        let mut items = self.items.write().await;
        let count = items.len();
        items.clear();
        info!("Cleared cart ({} items)", count);
        Ok(count)
    }
}
