//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod api_key;
pub mod catalog;
pub mod chat_exchange;
pub mod content;
pub mod session;
pub mod user;

pub use api_key::ApiKeyEntity;
pub use catalog::{FaqEntryEntity, MembershipPlanEntity, ScheduleSlotEntity, ShopItemEntity};
pub use chat_exchange::ChatExchangeEntity;
pub use content::{
    EventEntity, GalleryImageEntity, NavbarItemEntity, ServiceEntity, SitePageEntity,
    TrainerEntity,
};
pub use session::VisitorSessionEntity;
pub use user::UserEntity;
