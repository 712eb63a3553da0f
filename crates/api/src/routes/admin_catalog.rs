//! Admin CRUD for the shop, membership plans, the training schedule and
//! chatbot FAQ entries.

use axum::Router;
use domain::models::faq::{CreateFaqRequest, FaqEntry, UpdateFaqRequest};
use domain::models::membership::{
    CreateMembershipPlanRequest, MembershipPlan, UpdateMembershipPlanRequest,
};
use domain::models::schedule::{
    CreateScheduleSlotRequest, ScheduleSlot, UpdateScheduleSlotRequest,
};
use domain::models::shop::{CreateShopItemRequest, ShopItem, UpdateShopItemRequest};
use shared::money::Money;

use crate::app::AppState;
use crate::routes::PricedRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(shop_items::router())
        .merge(membership_plans::router())
        .merge(schedule_slots::router())
        .merge(faqs::router())
}

impl PricedRequest for CreateShopItemRequest {
    fn priced_fields(&self) -> Vec<(&'static str, Money)> {
        vec![("price", self.price)]
    }
}

impl PricedRequest for UpdateShopItemRequest {
    fn priced_fields(&self) -> Vec<(&'static str, Money)> {
        self.price.map(|p| ("price", p)).into_iter().collect()
    }
}

impl PricedRequest for CreateMembershipPlanRequest {
    fn priced_fields(&self) -> Vec<(&'static str, Money)> {
        self.money_fields()
    }
}

impl PricedRequest for UpdateMembershipPlanRequest {
    fn priced_fields(&self) -> Vec<(&'static str, Money)> {
        self.money_fields()
    }
}

impl PricedRequest for CreateScheduleSlotRequest {}
impl PricedRequest for UpdateScheduleSlotRequest {}
impl PricedRequest for CreateFaqRequest {}
impl PricedRequest for UpdateFaqRequest {}

admin_crud_routes!(shop_items {
    path: "/shop-items",
    label: "Shop item",
    repo: ShopItemRepository,
    model: ShopItem,
    create: CreateShopItemRequest,
    update: UpdateShopItemRequest,
});

admin_crud_routes!(membership_plans {
    path: "/membership-plans",
    label: "Membership plan",
    repo: MembershipPlanRepository,
    model: MembershipPlan,
    create: CreateMembershipPlanRequest,
    update: UpdateMembershipPlanRequest,
});

admin_crud_routes!(schedule_slots {
    path: "/schedule-slots",
    label: "Schedule slot",
    repo: ScheduleSlotRepository,
    model: ScheduleSlot,
    create: CreateScheduleSlotRequest,
    update: UpdateScheduleSlotRequest,
});

admin_crud_routes!(faqs {
    path: "/faqs",
    label: "FAQ entry",
    repo: FaqEntryRepository,
    model: FaqEntry,
    create: CreateFaqRequest,
    update: UpdateFaqRequest,
});
