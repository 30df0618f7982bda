use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{delete, get},
    Json, Router,
};
use flightcart_core::CartItem;
use serde::Serialize;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub success: bool,
    pub cart: Vec<CartItem>,
}

impl CartResponse {
    fn ok(cart: Vec<CartItem>) -> Json<Self> {
        Json(Self { success: true, cart })
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(list_cart).post(add_to_cart).delete(clear_cart))
        .route("/cart/{id}", delete(remove_from_cart))
}

/// POST /cart
/// The item is stored as sent; only its id is filled in when missing.
async fn add_to_cart(
    State(state): State<AppState>,
    payload: Result<Json<CartItem>, JsonRejection>,
) -> Result<Json<CartResponse>, AppError> {
    let Json(item) = payload.map_err(|rejection| AppError::InvalidBody(rejection.body_text()))?;
    let cart = state.cart.add(item).await?;
    Ok(CartResponse::ok(cart))
}

/// GET /cart
async fn list_cart(State(state): State<AppState>) -> Result<Json<CartResponse>, AppError> {
    Ok(CartResponse::ok(state.cart.list().await?))
}

/// DELETE /cart/{id}
async fn remove_from_cart(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = state.cart.remove(&id).await?;
    Ok(CartResponse::ok(cart))
}

/// DELETE /cart
async fn clear_cart(State(state): State<AppState>) -> Result<Json<CartResponse>, AppError> {
    state.cart.clear().await?;
    Ok(CartResponse::ok(Vec::new()))
}
