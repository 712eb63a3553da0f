//! Repository implementations for database operations.

pub mod api_key;
pub mod chat_exchange;
pub mod event;
pub mod faq_entry;
pub mod gallery_image;
pub mod knowledge;
pub mod membership_plan;
pub mod navbar_item;
pub mod schedule_slot;
pub mod service;
pub mod shop_item;
pub mod site_page;
pub mod trainer;
pub mod user;
pub mod visitor_session;

pub use api_key::ApiKeyRepository;
pub use chat_exchange::ChatExchangeRepository;
pub use event::EventRepository;
pub use faq_entry::FaqEntryRepository;
pub use gallery_image::GalleryImageRepository;
pub use knowledge::PgKnowledgeSource;
pub use membership_plan::MembershipPlanRepository;
pub use navbar_item::NavbarItemRepository;
pub use schedule_slot::ScheduleSlotRepository;
pub use service::ServiceRepository;
pub use shop_item::ShopItemRepository;
pub use site_page::SitePageRepository;
pub use trainer::TrainerRepository;
pub use user::UserRepository;
pub use visitor_session::VisitorSessionRepository;

/// Serializes a value for a JSONB column.
pub(crate) fn to_json_column<T: serde::Serialize>(
    value: &T,
    what: &str,
) -> Result<serde_json::Value, sqlx::Error> {
    serde_json::to_value(value)
        .map_err(|e| sqlx::Error::Protocol(format!("failed to encode {}: {}", what, e)))
}
