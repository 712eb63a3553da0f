//! Shop, membership, schedule and FAQ entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::faq::FaqEntry;
use domain::models::membership::{MembershipPlan, PlanDuration, PlanType};
use domain::models::schedule::{ScheduleSlot, Weekday};
use domain::models::shop::ShopItem;
use shared::money::Money;
use shared::text::normalize_keywords;
use sqlx::FromRow;

/// Database row mapping for the shop_items table.
#[derive(Debug, Clone, FromRow)]
pub struct ShopItemEntity {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub description: String,
    pub image_url: Option<String>,
    pub category: String,
    pub in_stock: bool,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShopItemEntity> for ShopItem {
    fn from(e: ShopItemEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            price: Money::from_cents(e.price_cents),
            description: e.description,
            image_url: e.image_url,
            category: e.category,
            in_stock: e.in_stock,
            display_order: e.display_order,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Database row mapping for the membership_plans table.
#[derive(Debug, Clone, FromRow)]
pub struct MembershipPlanEntity {
    pub id: i64,
    pub name: String,
    pub plan_type: String,
    pub price_cents: i64,
    pub original_price_cents: Option<i64>,
    pub duration: String,
    pub custom_duration: String,
    pub description: String,
    pub features: String,
    pub hot_sale_price_cents: Option<i64>,
    pub discount_percentage: Option<f64>,
    pub is_popular: bool,
    pub is_hot_sale: bool,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MembershipPlanEntity> for MembershipPlan {
    fn from(e: MembershipPlanEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            plan_type: e.plan_type.parse::<PlanType>().unwrap_or(PlanType::Custom),
            price: Money::from_cents(e.price_cents),
            original_price: e.original_price_cents.map(Money::from_cents),
            duration: e
                .duration
                .parse::<PlanDuration>()
                .unwrap_or(PlanDuration::Custom),
            custom_duration: e.custom_duration,
            description: e.description,
            features: e.features,
            hot_sale_price: e.hot_sale_price_cents.map(Money::from_cents),
            discount_percentage: e.discount_percentage,
            is_popular: e.is_popular,
            is_hot_sale: e.is_hot_sale,
            display_order: e.display_order,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Database row mapping for the schedule_slots table.
#[derive(Debug, Clone, FromRow)]
pub struct ScheduleSlotEntity {
    pub id: i64,
    pub day: i16,
    pub time_slot: String,
    pub class_type: String,
    pub coach: String,
    pub level: String,
    pub available_slots: i32,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ScheduleSlotEntity> for ScheduleSlot {
    fn from(e: ScheduleSlotEntity) -> Self {
        Self {
            id: e.id,
            // Column is CHECK-constrained to 1..=7.
            day: Weekday::from_index(e.day).unwrap_or(Weekday::Monday),
            time_slot: e.time_slot,
            class_type: e.class_type,
            coach: e.coach,
            level: e.level,
            available_slots: e.available_slots,
            display_order: e.display_order,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Database row mapping for the faq_entries table.
#[derive(Debug, Clone, FromRow)]
pub struct FaqEntryEntity {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub keywords: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FaqEntryEntity> for FaqEntry {
    fn from(e: FaqEntryEntity) -> Self {
        Self {
            id: e.id,
            question: e.question,
            answer: e.answer,
            // Rows written outside the API may hold raw keywords.
            keywords: normalize_keywords(&e.keywords),
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}
