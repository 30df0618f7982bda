//! Client-side cart mirror with optimistic updates.
//!
//! The local view is the source of truth for rendering. `add_locally` and
//! `remove_locally` change it synchronously and then queue the matching server
//! call for a background task that nobody awaits. That task sends calls one at
//! a time in the order they were queued, so an add followed by a remove of the
//! same id reaches the server in that order. A failed call is logged and
//! nothing else: the view stays diverged from the server until the next
//! [`CartCache::refresh`], which is the only operation that overwrites local
//! state with server state.

use std::sync::Arc;

use flightcart_core::CartItem;
use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::api::CartApi;
use crate::ClientError;

enum Pending {
    Add(CartItem),
    Remove(String),
}

pub struct CartCache<A: CartApi> {
    api: Arc<A>,
    view: RwLock<Vec<CartItem>>,
    outbox: mpsc::UnboundedSender<Pending>,
}

impl<A: CartApi> CartCache<A> {
    /// Starts the background sync task. Must be called inside a Tokio
    /// runtime; the task stops when the cache is dropped.
    pub fn new(api: Arc<A>) -> Self {
        let (outbox, calls) = mpsc::unbounded_channel();
        tokio::spawn(forward(api.clone(), calls));
        Self {
            api,
            view: RwLock::new(Vec::new()),
            outbox,
        }
    }

    /// Appends `item` locally and returns its id (client-generated when the
    /// item had none).
    pub fn add_locally(&self, item: CartItem) -> String {
        let id = match item.id() {
            Some(id) => id.to_string(),
            None => Uuid::new_v4().to_string(),
        };
        let item = item.with_id(id.clone());

        self.view.write().push(item.clone());

        if self.outbox.send(Pending::Add(item)).is_err() {
            warn!("Cart sync stopped, {} is only held locally", id);
        }
        id
    }

    /// Drops the item from the local view and asks the server to do the same.
    /// Returns whether the item was in the local view.
    pub fn remove_locally(&self, id: &str) -> bool {
        let removed = {
            let mut view = self.view.write();
            match view.iter().position(|item| item.id() == Some(id)) {
                Some(index) => {
                    view.remove(index);
                    true
                }
                None => false,
            }
        };

        if self.outbox.send(Pending::Remove(id.to_string())).is_err() {
            warn!("Cart sync stopped, removal of {} is only local", id);
        }
        removed
    }

    /// Replaces the local view with the server's cart. On error the view is
    /// left as it was.
    pub async fn refresh(&self) -> Result<(), ClientError> {
        let cart = self.api.list().await?;
        *self.view.write() = cart;
        Ok(())
    }

    pub fn view(&self) -> Vec<CartItem> {
        self.view.read().clone()
    }
}

async fn forward<A: CartApi>(api: Arc<A>, mut calls: mpsc::UnboundedReceiver<Pending>) {
    while let Some(call) = calls.recv().await {
        match call {
            Pending::Add(item) => {
                let item_id = item.id().unwrap_or_default().to_string();
                if let Err(e) = api.add(item).await {
                    warn!("Cart add for {} failed, local cart diverged until refresh: {}", item_id, e);
                }
            }
            Pending::Remove(item_id) => match api.remove(&item_id).await {
                Ok(_) => {}
                Err(ClientError::NotFound(_)) => {
                    debug!("Cart item {} was already gone on the server", item_id)
                }
                Err(e) => {
                    warn!("Cart remove for {} failed, local cart diverged until refresh: {}", item_id, e)
                }
            },
        }
    }
}
