//! Shop catalog domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::money::Money;
use validator::Validate;

/// A product sold in the gym shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopItem {
    pub id: i64,
    pub name: String,
    pub price: Money,
    pub description: String,
    pub image_url: Option<String>,
    pub category: String,
    pub in_stock: bool,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sort orders accepted by the shop listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopSort {
    PriceLowHigh,
    PriceHighLow,
    NameAZ,
    NameZA,
}

impl ShopSort {
    /// Parses a query-string value. Unknown values mean display order.
    pub fn from_param(value: &str) -> Option<ShopSort> {
        match value {
            "price_low_high" => Some(ShopSort::PriceLowHigh),
            "price_high_low" => Some(ShopSort::PriceHighLow),
            "name_a_z" => Some(ShopSort::NameAZ),
            "name_z_a" => Some(ShopSort::NameZA),
            _ => None,
        }
    }
}

/// Shop listing filters, taken from the query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShopQuery {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub sort: String,
    #[serde(default)]
    pub search: String,
}

impl ShopQuery {
    pub fn sort_order(&self) -> Option<ShopSort> {
        ShopSort::from_param(self.sort.trim())
    }
}

/// Request payload for creating a shop item.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateShopItemRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    pub price: Money,

    #[serde(default)]
    pub description: String,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    #[serde(default)]
    pub category: String,

    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Request payload for updating a shop item. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateShopItemRequest {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: Option<String>,
    pub price: Option<Money>,
    pub description: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(length(max = 100, message = "Category must be at most 100 characters"))]
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}
