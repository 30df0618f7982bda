use async_trait::async_trait;

use crate::models::CartItem;
use crate::CoreResult;

/// Server-authoritative cart. Implementations keep insertion order and never
/// deduplicate; they do not validate item contents.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Appends `item`, assigning an id when it has none. Returns the whole cart.
    async fn add(&self, item: CartItem) -> CoreResult<Vec<CartItem>>;

    async fn list(&self) -> CoreResult<Vec<CartItem>>;

    /// Removes the first item with this id, or fails with `CartItemNotFound`.
    async fn remove(&self, id: &str) -> CoreResult<Vec<CartItem>>;

    /// Empties the cart, returning how many items were dropped.
    async fn clear(&self) -> CoreResult<usize>;
}
