//! Visitor shopping cart and its pricing rules.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use shared::money::Money;
use thiserror::Error;

use super::shop::ShopItem;

/// Errors from cart mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Item {0} is not in the cart")]
    NotInCart(i64),
}

/// Item id to quantity. Quantities are always at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: BTreeMap<i64, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, item_id: i64) -> bool {
        self.lines.contains_key(&item_id)
    }

    pub fn quantity(&self, item_id: i64) -> u32 {
        self.lines.get(&item_id).copied().unwrap_or(0)
    }

    /// Item ids in the cart, ascending.
    pub fn item_ids(&self) -> Vec<i64> {
        self.lines.keys().copied().collect()
    }

    /// Total number of units across all lines.
    pub fn count(&self) -> u32 {
        self.lines.values().sum()
    }

    /// Adds one unit, creating the line if needed. Returns the new quantity.
    pub fn add(&mut self, item_id: i64) -> u32 {
        let quantity = self.lines.entry(item_id).or_insert(0);
        *quantity = quantity.saturating_add(1);
        *quantity
    }

    /// Adds one unit to an existing line.
    pub fn increase(&mut self, item_id: i64) -> Result<u32, CartError> {
        let quantity = self
            .lines
            .get_mut(&item_id)
            .ok_or(CartError::NotInCart(item_id))?;
        *quantity = quantity.saturating_add(1);
        Ok(*quantity)
    }

    /// Removes one unit. Returns the remaining quantity, 0 when the line
    /// was dropped.
    pub fn decrease(&mut self, item_id: i64) -> Result<u32, CartError> {
        let quantity = self
            .lines
            .get_mut(&item_id)
            .ok_or(CartError::NotInCart(item_id))?;
        if *quantity > 1 {
            *quantity -= 1;
            Ok(*quantity)
        } else {
            self.lines.remove(&item_id);
            Ok(0)
        }
    }

    pub fn remove(&mut self, item_id: i64) -> Result<(), CartError> {
        self.lines
            .remove(&item_id)
            .map(|_| ())
            .ok_or(CartError::NotInCart(item_id))
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Drops every line whose id is not in `keep`. Returns the dropped ids.
    pub fn retain_items(&mut self, keep: &[i64]) -> Vec<i64> {
        let dropped: Vec<i64> = self
            .lines
            .keys()
            .filter(|id| !keep.contains(*id))
            .copied()
            .collect();
        for id in &dropped {
            self.lines.remove(id);
        }
        dropped
    }
}

/// Shipping and tax rules applied when a cart is viewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartPricing {
    /// Orders strictly above this subtotal ship free.
    pub free_shipping_threshold: Money,
    pub flat_shipping: Money,
    pub tax_rate_bps: u32,
}

impl Default for CartPricing {
    fn default() -> Self {
        Self {
            free_shipping_threshold: Money::from_cents(10_000),
            flat_shipping: Money::from_cents(1_500),
            tax_rate_bps: 800,
        }
    }
}

/// A cart line resolved against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub item_id: i64,
    pub name: String,
    pub price: Money,
    pub image_url: Option<String>,
    pub quantity: u32,
    pub line_total: Money,
}

/// Priced view of a cart.
#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartLine>,
    pub cart_count: u32,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    pub total: Money,
}

impl CartPricing {
    pub fn shipping_for(&self, subtotal: Money, empty: bool) -> Money {
        if empty || subtotal > self.free_shipping_threshold {
            Money::ZERO
        } else {
            self.flat_shipping
        }
    }

    /// Prices the cart against `items`, which should be the active catalog
    /// entries for the cart's ids. Lines with no matching item are left out
    /// of the summary; callers prune them with [`Cart::retain_items`].
    pub fn summarize(&self, cart: &Cart, items: &[ShopItem]) -> CartSummary {
        let by_id: HashMap<i64, &ShopItem> = items.iter().map(|i| (i.id, i)).collect();

        let lines: Vec<CartLine> = cart
            .lines
            .iter()
            .filter_map(|(id, quantity)| {
                by_id.get(id).map(|item| CartLine {
                    item_id: item.id,
                    name: item.name.clone(),
                    price: item.price,
                    image_url: item.image_url.clone(),
                    quantity: *quantity,
                    line_total: item.price * *quantity,
                })
            })
            .collect();

        let subtotal: Money = lines.iter().map(|l| l.line_total).sum();
        let shipping = self.shipping_for(subtotal, lines.is_empty());
        let tax = subtotal.percent_bps(self.tax_rate_bps);

        CartSummary {
            cart_count: lines.iter().map(|l| l.quantity).sum(),
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
            items: lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(id: i64, cents: i64) -> ShopItem {
        ShopItem {
            id,
            name: format!("Item {}", id),
            price: Money::from_cents(cents),
            description: String::new(),
            image_url: None,
            category: "Gear".to_string(),
            in_stock: true,
            display_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_and_count() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(7), 1);
        assert_eq!(cart.add(7), 2);
        assert_eq!(cart.add(3), 1);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.item_ids(), vec![3, 7]);
    }

    #[test]
    fn test_increase_requires_line() {
        let mut cart = Cart::new();
        assert_eq!(cart.increase(1), Err(CartError::NotInCart(1)));
        cart.add(1);
        assert_eq!(cart.increase(1), Ok(2));
    }

    #[test]
    fn test_decrease_drops_line_at_one() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(1);
        assert_eq!(cart.decrease(1), Ok(1));
        assert_eq!(cart.decrease(1), Ok(0));
        assert!(!cart.contains(1));
        assert_eq!(cart.decrease(1), Err(CartError::NotInCart(1)));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(2);
        assert!(cart.remove(1).is_ok());
        assert!(cart.remove(1).is_err());
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_retain_items() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(2);
        cart.add(3);
        assert_eq!(cart.retain_items(&[2]), vec![1, 3]);
        assert_eq!(cart.item_ids(), vec![2]);
    }

    #[test]
    fn test_serde_as_object() {
        let mut cart = Cart::new();
        cart.add(12);
        cart.add(12);
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json, serde_json::json!({"12": 2}));
        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    #[test]
    fn test_summary_with_flat_shipping() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(1);
        cart.add(2);
        let summary = CartPricing::default().summarize(&cart, &[item(1, 1999), item(2, 2500)]);

        assert_eq!(summary.subtotal.cents(), 6498);
        assert_eq!(summary.shipping.cents(), 1500);
        // 8% of 64.98 = 5.1984
        assert_eq!(summary.tax.cents(), 520);
        assert_eq!(summary.total.cents(), 6498 + 1500 + 520);
        assert_eq!(summary.cart_count, 3);
        assert_eq!(summary.items[0].line_total.cents(), 3998);
    }

    #[test]
    fn test_free_shipping_strictly_above_threshold() {
        let pricing = CartPricing::default();
        let mut cart = Cart::new();
        cart.add(1);

        let at_threshold = pricing.summarize(&cart, &[item(1, 10_000)]);
        assert_eq!(at_threshold.shipping.cents(), 1500);

        let above = pricing.summarize(&cart, &[item(1, 10_001)]);
        assert!(above.shipping.is_zero());
    }

    #[test]
    fn test_empty_cart_is_free() {
        let summary = CartPricing::default().summarize(&Cart::new(), &[]);
        assert!(summary.total.is_zero());
        assert!(summary.shipping.is_zero());
    }

    #[test]
    fn test_missing_items_are_skipped() {
        let mut cart = Cart::new();
        cart.add(1);
        cart.add(99);
        let summary = CartPricing::default().summarize(&cart, &[item(1, 500)]);
        assert_eq!(summary.items.len(), 1);
        assert_eq!(summary.cart_count, 1);
    }
}
