//! Site content entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::content::{Event, GalleryCategory, GalleryImage, NavbarItem, Service, Trainer};
use shared::money::Money;
use sqlx::FromRow;

/// Database row mapping for the services table.
#[derive(Debug, Clone, FromRow)]
pub struct ServiceEntity {
    pub id: i64,
    pub name: String,
    pub link: String,
    pub description: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ServiceEntity> for Service {
    fn from(e: ServiceEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            link: e.link,
            description: e.description,
            display_order: e.display_order,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Database row mapping for the trainers table.
#[derive(Debug, Clone, FromRow)]
pub struct TrainerEntity {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image_url: Option<String>,
    pub experience: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TrainerEntity> for Trainer {
    fn from(e: TrainerEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            role: e.role,
            bio: e.bio,
            image_url: e.image_url,
            experience: e.experience,
            display_order: e.display_order,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub description: String,
    pub location: String,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for Event {
    fn from(e: EventEntity) -> Self {
        Self {
            id: e.id,
            title: e.title,
            date: e.date,
            description: e.description,
            location: e.location,
            price: e.price_cents.map(Money::from_cents),
            image_url: e.image_url,
            display_order: e.display_order,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Database row mapping for the navbar_items table.
#[derive(Debug, Clone, FromRow)]
pub struct NavbarItemEntity {
    pub id: i64,
    pub name: String,
    pub link: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NavbarItemEntity> for NavbarItem {
    fn from(e: NavbarItemEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            link: e.link,
            display_order: e.display_order,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Database row mapping for the gallery_images table.
#[derive(Debug, Clone, FromRow)]
pub struct GalleryImageEntity {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub caption: String,
    pub category: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<GalleryImageEntity> for GalleryImage {
    fn from(e: GalleryImageEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            image_url: e.image_url,
            caption: e.caption,
            // Column is CHECK-constrained to known categories.
            category: e
                .category
                .parse::<GalleryCategory>()
                .unwrap_or(GalleryCategory::Training),
            display_order: e.display_order,
            is_active: e.is_active,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

/// Database row mapping for the site_pages table.
#[derive(Debug, Clone, FromRow)]
pub struct SitePageEntity {
    pub key: String,
    pub content: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}
