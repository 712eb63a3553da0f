//! Session cart endpoints.

use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Json, Router,
};
use domain::models::cart::{Cart, CartSummary};
use domain::models::shop::ShopItem;
use persistence::repositories::{ShopItemRepository, VisitorSessionRepository};
use serde::Serialize;
use tracing::{debug, info};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::VisitorSession;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/cart", get(view_cart).delete(clear_cart))
        .route("/api/v1/cart/count", get(cart_count))
        .route("/api/v1/cart/items/:id", post(add_item).delete(remove_item))
        .route("/api/v1/cart/items/:id/increase", post(increase_item))
        .route("/api/v1/cart/items/:id/decrease", post(decrease_item))
}

#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub cart_count: u32,
}

/// Result of a line change. `quantity` is 0 once the line is gone.
#[derive(Debug, Serialize)]
pub struct CartLineUpdate {
    pub item_id: i64,
    pub quantity: u32,
    pub cart_count: u32,
}

impl CartLineUpdate {
    fn new(cart: &Cart, item_id: i64) -> Self {
        Self {
            item_id,
            quantity: cart.quantity(item_id),
            cart_count: cart.count(),
        }
    }
}

fn sessions(state: &AppState) -> VisitorSessionRepository {
    VisitorSessionRepository::new(state.pool.clone())
}

/// GET /api/v1/cart
///
/// Lines whose item was deleted or deactivated are dropped from the stored
/// cart before pricing.
async fn view_cart(
    State(state): State<AppState>,
    session: VisitorSession,
) -> Result<Json<CartSummary>, ApiError> {
    let repo = sessions(&state);
    let mut cart = repo.load_cart(session.id).await?;

    let items: Vec<ShopItem> = if cart.is_empty() {
        Vec::new()
    } else {
        ShopItemRepository::new(state.pool.clone())
            .find_active_by_ids(&cart.item_ids())
            .await?
            .into_iter()
            .map(ShopItem::from)
            .collect()
    };

    let available: Vec<i64> = items.iter().map(|item| item.id).collect();
    let pruned = cart.retain_items(&available);
    if !pruned.is_empty() {
        debug!(session_id = %session.id, ?pruned, "Pruned unavailable cart lines");
        repo.save_cart(session.id, &cart).await?;
    }

    Ok(Json(state.pricing.summarize(&cart, &items)))
}

/// GET /api/v1/cart/count
async fn cart_count(
    State(state): State<AppState>,
    session: VisitorSession,
) -> Result<Json<CartCountResponse>, ApiError> {
    let cart = sessions(&state).load_cart(session.id).await?;
    Ok(Json(CartCountResponse {
        cart_count: cart.count(),
    }))
}

/// POST /api/v1/cart/items/:id
async fn add_item(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(item_id): Path<i64>,
) -> Result<Json<CartLineUpdate>, ApiError> {
    ShopItemRepository::new(state.pool.clone())
        .find_active_by_id(item_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;

    let repo = sessions(&state);
    let mut cart = repo.load_cart(session.id).await?;
    cart.add(item_id);
    repo.save_cart(session.id, &cart).await?;

    info!(session_id = %session.id, item_id, "Item added to cart");
    Ok(Json(CartLineUpdate::new(&cart, item_id)))
}

/// POST /api/v1/cart/items/:id/increase
async fn increase_item(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(item_id): Path<i64>,
) -> Result<Json<CartLineUpdate>, ApiError> {
    let repo = sessions(&state);
    let mut cart = repo.load_cart(session.id).await?;
    cart.increase(item_id)?;
    repo.save_cart(session.id, &cart).await?;

    Ok(Json(CartLineUpdate::new(&cart, item_id)))
}

/// POST /api/v1/cart/items/:id/decrease
async fn decrease_item(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(item_id): Path<i64>,
) -> Result<Json<CartLineUpdate>, ApiError> {
    let repo = sessions(&state);
    let mut cart = repo.load_cart(session.id).await?;
    cart.decrease(item_id)?;
    repo.save_cart(session.id, &cart).await?;

    Ok(Json(CartLineUpdate::new(&cart, item_id)))
}

/// DELETE /api/v1/cart/items/:id
async fn remove_item(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(item_id): Path<i64>,
) -> Result<Json<CartLineUpdate>, ApiError> {
    let repo = sessions(&state);
    let mut cart = repo.load_cart(session.id).await?;
    cart.remove(item_id)?;
    repo.save_cart(session.id, &cart).await?;

    info!(session_id = %session.id, item_id, "Item removed from cart");
    Ok(Json(CartLineUpdate::new(&cart, item_id)))
}

/// DELETE /api/v1/cart
async fn clear_cart(
    State(state): State<AppState>,
    session: VisitorSession,
) -> Result<Json<CartCountResponse>, ApiError> {
    let repo = sessions(&state);
    let mut cart = repo.load_cart(session.id).await?;
    if !cart.is_empty() {
        cart.clear();
        repo.save_cart(session.id, &cart).await?;
    }

    Ok(Json(CartCountResponse { cart_count: 0 }))
}
