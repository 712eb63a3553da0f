//! Shop listing and product detail.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use domain::models::shop::{ShopItem, ShopQuery};
use domain::services::catalog::{filter_shop_items, related_items, shop_categories};
use persistence::repositories::{ShopItemRepository, VisitorSessionRepository};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::VisitorSession;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/shop", get(list_items))
        .route("/api/v1/shop/products/:id", get(product_detail))
}

#[derive(Debug, Serialize)]
pub struct ShopResponse {
    pub items: Vec<ShopItem>,
    pub categories: Vec<String>,
    pub cart_count: u32,
    /// The filters as received.
    pub filters: ShopQuery,
}

#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub item: ShopItem,
    pub related: Vec<ShopItem>,
    pub cart_count: u32,
}

async fn active_items(state: &AppState) -> Result<Vec<ShopItem>, ApiError> {
    Ok(ShopItemRepository::new(state.pool.clone())
        .list_active()
        .await?
        .into_iter()
        .map(ShopItem::from)
        .collect())
}

async fn cart_count(state: &AppState, session: VisitorSession) -> Result<u32, ApiError> {
    let cart = VisitorSessionRepository::new(state.pool.clone())
        .load_cart(session.id)
        .await?;
    Ok(cart.count())
}

/// GET /api/v1/shop?category=&sort=&search=
async fn list_items(
    State(state): State<AppState>,
    session: VisitorSession,
    Query(query): Query<ShopQuery>,
) -> Result<Json<ShopResponse>, ApiError> {
    let items = active_items(&state).await?;
    let categories = shop_categories(&items);
    let items = filter_shop_items(items, &query);

    Ok(Json(ShopResponse {
        items,
        categories,
        cart_count: cart_count(&state, session).await?,
        filters: query,
    }))
}

/// GET /api/v1/shop/products/:id
async fn product_detail(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(id): Path<i64>,
) -> Result<Json<ProductDetailResponse>, ApiError> {
    let items = active_items(&state).await?;
    let item = items
        .iter()
        .find(|item| item.id == id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
    let related = related_items(&item, &items);

    Ok(Json(ProductDetailResponse {
        item,
        related,
        cart_count: cart_count(&state, session).await?,
    }))
}
