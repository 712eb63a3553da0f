//! Catalog queries over the shop and membership plans.
//!
//! All functions take records already restricted to active entries and
//! sorted by display order, which is how the repositories return them.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::content::MembershipPageContent;
use crate::models::membership::{MembershipPlan, MembershipPlanView, PlanType};
use crate::models::shop::{ShopItem, ShopQuery, ShopSort};

/// Number of related products shown on a product page.
pub const RELATED_PRODUCTS_LIMIT: usize = 4;

/// Applies search, category filter and sort to the shop listing.
pub fn filter_shop_items(items: Vec<ShopItem>, query: &ShopQuery) -> Vec<ShopItem> {
    let search = query.search.trim().to_lowercase();
    let category = query.category.trim();

    let mut matched: Vec<ShopItem> = items
        .into_iter()
        .filter(|item| {
            search.is_empty()
                || item.name.to_lowercase().contains(&search)
                || item.description.to_lowercase().contains(&search)
                || item.category.to_lowercase().contains(&search)
        })
        .filter(|item| category.is_empty() || item.category == category)
        .collect();

    match query.sort_order() {
        Some(ShopSort::PriceLowHigh) => matched.sort_by_key(|item| item.price),
        Some(ShopSort::PriceHighLow) => matched.sort_by(|a, b| b.price.cmp(&a.price)),
        Some(ShopSort::NameAZ) => matched.sort_by_key(|item| item.name.to_lowercase()),
        Some(ShopSort::NameZA) => {
            matched.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
        }
        None => {}
    }

    matched
}

/// Distinct non-empty categories, in first-seen order.
pub fn shop_categories(items: &[ShopItem]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for item in items {
        if !item.category.is_empty() && !categories.contains(&item.category) {
            categories.push(item.category.clone());
        }
    }
    categories
}

/// Other items in the same category as `item`, up to the related limit.
pub fn related_items(item: &ShopItem, items: &[ShopItem]) -> Vec<ShopItem> {
    items
        .iter()
        .filter(|other| other.id != item.id && other.category == item.category)
        .take(RELATED_PRODUCTS_LIMIT)
        .cloned()
        .collect()
}

/// Membership plans page payload.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipPage {
    pub content: MembershipPageContent,
    pub hot_sale_plans: Vec<MembershipPlanView>,
    pub plans: Vec<MembershipPlanView>,
    /// Whether an active plan of each type exists, keyed by type name.
    pub plan_categories: BTreeMap<&'static str, bool>,
}

/// Splits active plans into hot-sale and regular groups.
pub fn membership_page(
    plans: Vec<MembershipPlan>,
    content: MembershipPageContent,
) -> MembershipPage {
    let plan_categories = PlanType::ALL
        .iter()
        .map(|plan_type| {
            (
                plan_type.as_str(),
                plans.iter().any(|plan| plan.plan_type == *plan_type),
            )
        })
        .collect();

    let (hot, regular): (Vec<MembershipPlan>, Vec<MembershipPlan>) =
        plans.into_iter().partition(|plan| plan.is_hot_sale);

    MembershipPage {
        content,
        hot_sale_plans: hot.into_iter().map(MembershipPlanView::from).collect(),
        plans: regular.into_iter().map(MembershipPlanView::from).collect(),
        plan_categories,
    }
}

/// Finds a plan by name, ignoring case.
pub fn find_plan_by_name(plans: Vec<MembershipPlan>, name: &str) -> Option<MembershipPlan> {
    let wanted = name.trim().to_lowercase();
    plans
        .into_iter()
        .find(|plan| plan.name.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::membership::PlanDuration;
    use chrono::Utc;
    use shared::money::Money;

    fn item(id: i64, name: &str, cents: i64, category: &str) -> ShopItem {
        ShopItem {
            id,
            name: name.to_string(),
            price: Money::from_cents(cents),
            description: format!("{} for the gym", name),
            image_url: None,
            category: category.to_string(),
            in_stock: true,
            display_order: id as i32,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn catalog() -> Vec<ShopItem> {
        vec![
            item(1, "Leather Gloves", 5999, "Gloves"),
            item(2, "Hand Wraps", 999, "Accessories"),
            item(3, "bag Gloves", 3999, "Gloves"),
            item(4, "Jump Rope", 1499, ""),
        ]
    }

    fn query(category: &str, sort: &str, search: &str) -> ShopQuery {
        ShopQuery {
            category: category.to_string(),
            sort: sort.to_string(),
            search: search.to_string(),
        }
    }

    fn ids(items: &[ShopItem]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_no_filters_keeps_display_order() {
        assert_eq!(ids(&filter_shop_items(catalog(), &ShopQuery::default())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        assert_eq!(ids(&filter_shop_items(catalog(), &query("", "", "GLOVES"))), vec![1, 3]);
        assert_eq!(ids(&filter_shop_items(catalog(), &query("", "", "accessor"))), vec![2]);
        assert_eq!(ids(&filter_shop_items(catalog(), &query("", "", "for the gym"))).len(), 4);
    }

    #[test]
    fn test_category_is_exact() {
        assert_eq!(ids(&filter_shop_items(catalog(), &query("Gloves", "", ""))), vec![1, 3]);
        assert!(filter_shop_items(catalog(), &query("gloves", "", "")).is_empty());
    }

    #[test]
    fn test_sorts() {
        assert_eq!(
            ids(&filter_shop_items(catalog(), &query("", "price_low_high", ""))),
            vec![2, 4, 3, 1]
        );
        assert_eq!(
            ids(&filter_shop_items(catalog(), &query("", "price_high_low", ""))),
            vec![1, 3, 4, 2]
        );
        assert_eq!(
            ids(&filter_shop_items(catalog(), &query("", "name_a_z", ""))),
            vec![3, 2, 4, 1]
        );
        assert_eq!(
            ids(&filter_shop_items(catalog(), &query("", "name_z_a", ""))),
            vec![1, 4, 2, 3]
        );
        assert_eq!(
            ids(&filter_shop_items(catalog(), &query("", "bogus", ""))),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn test_combined_filters() {
        let result = filter_shop_items(catalog(), &query("Gloves", "price_low_high", "glove"));
        assert_eq!(ids(&result), vec![3, 1]);
    }

    #[test]
    fn test_categories_skip_empty_and_dedupe() {
        assert_eq!(shop_categories(&catalog()), vec!["Gloves", "Accessories"]);
    }

    #[test]
    fn test_related_items_limit_and_exclusion() {
        let mut items: Vec<ShopItem> = (1..=7).map(|i| item(i, "Glove", 1000, "Gloves")).collect();
        items.push(item(8, "Rope", 1000, "Cardio"));
        let related = related_items(&items[0], &items);
        assert_eq!(ids(&related), vec![2, 3, 4, 5]);
    }

    fn plan(id: i64, name: &str, plan_type: PlanType, hot: bool) -> MembershipPlan {
        MembershipPlan {
            id,
            name: name.to_string(),
            plan_type,
            price: Money::from_cents(4999),
            original_price: None,
            duration: PlanDuration::OneMonth,
            custom_duration: String::new(),
            description: String::new(),
            features: "Open gym".to_string(),
            hot_sale_price: None,
            discount_percentage: None,
            is_popular: false,
            is_hot_sale: hot,
            display_order: 0,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_membership_page_split() {
        let page = membership_page(
            vec![
                plan(1, "Starter", PlanType::Beginner, false),
                plan(2, "Summer Blast", PlanType::Pro, true),
                plan(3, "Champion", PlanType::Elite, false),
            ],
            MembershipPageContent::default(),
        );
        assert_eq!(page.hot_sale_plans.len(), 1);
        assert_eq!(page.hot_sale_plans[0].plan.name, "Summer Blast");
        assert_eq!(page.plans.len(), 2);
        assert_eq!(page.plan_categories["beginner"], true);
        assert_eq!(page.plan_categories["pro"], true);
        assert_eq!(page.plan_categories["custom"], false);
    }

    #[test]
    fn test_find_plan_by_name_ignores_case() {
        let plans = vec![plan(1, "Pro Fighter", PlanType::Pro, false)];
        assert!(find_plan_by_name(plans.clone(), "pro fighter").is_some());
        assert!(find_plan_by_name(plans, "Amateur").is_none());
    }
}
