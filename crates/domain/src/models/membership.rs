//! Membership plan domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::money::Money;
use validator::Validate;

/// Tier a plan belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    Beginner,
    Pro,
    Elite,
    Custom,
}

impl PlanType {
    pub const ALL: [PlanType; 4] = [
        PlanType::Beginner,
        PlanType::Pro,
        PlanType::Elite,
        PlanType::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlanType::Beginner => "beginner",
            PlanType::Pro => "pro",
            PlanType::Elite => "elite",
            PlanType::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlanType::Beginner => "Beginner",
            PlanType::Pro => "Pro Fighter",
            PlanType::Elite => "Elite",
            PlanType::Custom => "Custom",
        }
    }
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown plan type: {}", s))
    }
}

/// Billing period of a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanDuration {
    #[serde(rename = "1_month")]
    OneMonth,
    #[serde(rename = "3_months")]
    ThreeMonths,
    #[serde(rename = "6_months")]
    SixMonths,
    #[serde(rename = "12_months")]
    TwelveMonths,
    #[serde(rename = "custom")]
    Custom,
}

impl PlanDuration {
    const ALL: [PlanDuration; 5] = [
        PlanDuration::OneMonth,
        PlanDuration::ThreeMonths,
        PlanDuration::SixMonths,
        PlanDuration::TwelveMonths,
        PlanDuration::Custom,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlanDuration::OneMonth => "1_month",
            PlanDuration::ThreeMonths => "3_months",
            PlanDuration::SixMonths => "6_months",
            PlanDuration::TwelveMonths => "12_months",
            PlanDuration::Custom => "custom",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PlanDuration::OneMonth => "1 Month",
            PlanDuration::ThreeMonths => "3 Months",
            PlanDuration::SixMonths => "6 Months",
            PlanDuration::TwelveMonths => "12 Months",
            PlanDuration::Custom => "Custom Duration",
        }
    }
}

impl fmt::Display for PlanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanDuration {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("Unknown plan duration: {}", s))
    }
}

/// A purchasable membership plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: i64,
    pub name: String,
    pub plan_type: PlanType,
    pub price: Money,
    pub original_price: Option<Money>,
    pub duration: PlanDuration,
    pub custom_duration: String,
    pub description: String,
    /// Comma-separated feature list as entered by staff.
    pub features: String,
    pub hot_sale_price: Option<Money>,
    pub discount_percentage: Option<f64>,
    pub is_popular: bool,
    pub is_hot_sale: bool,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MembershipPlan {
    pub fn features_list(&self) -> Vec<String> {
        self.features
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Custom text for custom-length plans, otherwise the duration label.
    pub fn duration_display(&self) -> String {
        if self.duration == PlanDuration::Custom && !self.custom_duration.trim().is_empty() {
            self.custom_duration.clone()
        } else {
            self.duration.label().to_string()
        }
    }

    /// Amount saved against the original price, zero when not discounted.
    pub fn savings(&self) -> Money {
        match self.original_price {
            Some(original) if original > self.price => original - self.price,
            _ => Money::ZERO,
        }
    }

    /// Discount as a whole percentage, rounded half to even.
    pub fn savings_percent(&self) -> i64 {
        let original = match self.original_price {
            Some(original) if original > self.price => original.cents(),
            _ => return 0,
        };
        let scaled = self.savings().cents() * 100;
        let (quotient, remainder) = (scaled / original, scaled % original);
        match (remainder * 2).cmp(&original) {
            std::cmp::Ordering::Greater => quotient + 1,
            std::cmp::Ordering::Equal if quotient % 2 == 1 => quotient + 1,
            _ => quotient,
        }
    }
}

/// Plan as served to clients, with derived display values.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipPlanView {
    #[serde(flatten)]
    pub plan: MembershipPlan,
    pub plan_type_label: &'static str,
    pub features_list: Vec<String>,
    pub duration_display: String,
    pub savings: Money,
    pub savings_percent: i64,
}

impl From<MembershipPlan> for MembershipPlanView {
    fn from(plan: MembershipPlan) -> Self {
        Self {
            plan_type_label: plan.plan_type.label(),
            features_list: plan.features_list(),
            duration_display: plan.duration_display(),
            savings: plan.savings(),
            savings_percent: plan.savings_percent(),
            plan,
        }
    }
}

/// Compact projection used by the chatbot plans endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipPlanSummary {
    pub name: String,
    pub price: Money,
    pub duration: String,
    pub features: String,
}

impl From<&MembershipPlan> for MembershipPlanSummary {
    fn from(plan: &MembershipPlan) -> Self {
        Self {
            name: plan.name.clone(),
            price: plan.price,
            duration: plan.duration_display(),
            features: plan.features.clone(),
        }
    }
}

/// Request payload for creating a plan.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMembershipPlanRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default = "default_plan_type")]
    pub plan_type: PlanType,

    pub price: Money,
    pub original_price: Option<Money>,

    #[serde(default = "default_duration")]
    pub duration: PlanDuration,

    #[validate(length(max = 50, message = "Custom duration must be at most 50 characters"))]
    #[serde(default)]
    pub custom_duration: String,

    #[serde(default)]
    pub description: String,

    pub features: String,

    pub hot_sale_price: Option<Money>,

    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    pub discount_percentage: Option<f64>,

    #[serde(default)]
    pub is_popular: bool,
    #[serde(default)]
    pub is_hot_sale: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl CreateMembershipPlanRequest {
    /// Money fields that must not be negative, by field name.
    pub fn money_fields(&self) -> Vec<(&'static str, Money)> {
        let mut fields = vec![("price", self.price)];
        fields.extend(self.original_price.map(|m| ("original_price", m)));
        fields.extend(self.hot_sale_price.map(|m| ("hot_sale_price", m)));
        fields
    }
}

/// Request payload for updating a plan. Absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMembershipPlanRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    pub plan_type: Option<PlanType>,
    pub price: Option<Money>,
    pub original_price: Option<Money>,
    pub duration: Option<PlanDuration>,
    #[validate(length(max = 50, message = "Custom duration must be at most 50 characters"))]
    pub custom_duration: Option<String>,
    pub description: Option<String>,
    pub features: Option<String>,
    pub hot_sale_price: Option<Money>,
    #[validate(range(min = 0.0, max = 100.0, message = "Discount must be between 0 and 100"))]
    pub discount_percentage: Option<f64>,
    pub is_popular: Option<bool>,
    pub is_hot_sale: Option<bool>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdateMembershipPlanRequest {
    pub fn money_fields(&self) -> Vec<(&'static str, Money)> {
        [
            ("price", self.price),
            ("original_price", self.original_price),
            ("hot_sale_price", self.hot_sale_price),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|m| (name, m)))
        .collect()
    }
}

fn default_plan_type() -> PlanType {
    PlanType::Beginner
}

fn default_duration() -> PlanDuration {
    PlanDuration::OneMonth
}

fn default_true() -> bool {
    true
}
