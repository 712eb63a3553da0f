//! Admin-editable site content: list records and page singletons.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::money::Money;
use shared::validation::validate_hex_color;
use validator::Validate;

/// A service offered by the gym.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub link: String,
    pub description: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(max = 200, message = "Link must be at most 200 characters"))]
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 200, message = "Link must be at most 200 characters"))]
    pub link: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// A coach shown on the home and about pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trainer {
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

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTrainerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Role must be 1-100 characters"))]
    pub role: String,
    #[serde(default)]
    pub bio: String,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(length(max = 100, message = "Experience must be at most 100 characters"))]
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTrainerRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Role must be 1-100 characters"))]
    pub role: Option<String>,
    pub bio: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    #[validate(length(max = 100, message = "Experience must be at most 100 characters"))]
    pub experience: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// An upcoming event. `date` is free text ("Every Saturday", "March 3rd").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub date: String,
    pub description: String,
    pub location: String,
    pub price: Option<Money>,
    pub image_url: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 100, message = "Date must be 1-100 characters"))]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    #[serde(default)]
    pub location: String,
    pub price: Option<Money>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Date must be 1-100 characters"))]
    pub date: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,
    pub price: Option<Money>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// A link in the site navigation bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavbarItem {
    pub id: i64,
    pub name: String,
    pub link: String,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNavbarItemRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 200, message = "Link must be 1-200 characters"))]
    pub link: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateNavbarItemRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200, message = "Link must be 1-200 characters"))]
    pub link: Option<String>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// Gallery grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    Training,
    Facility,
    Events,
    Team,
}

impl GalleryCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            GalleryCategory::Training => "training",
            GalleryCategory::Facility => "facility",
            GalleryCategory::Events => "events",
            GalleryCategory::Team => "team",
        }
    }
}

impl std::str::FromStr for GalleryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "training" => Ok(GalleryCategory::Training),
            "facility" => Ok(GalleryCategory::Facility),
            "events" => Ok(GalleryCategory::Events),
            "team" => Ok(GalleryCategory::Team),
            other => Err(format!("Unknown gallery category: {}", other)),
        }
    }
}

/// A home page gallery picture. Listed by display order, then name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryImage {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub caption: String,
    pub category: GalleryCategory,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGalleryImageRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,
    #[serde(default)]
    pub caption: String,
    pub category: GalleryCategory,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateGalleryImageRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,
    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,
    pub caption: Option<String>,
    pub category: Option<GalleryCategory>,
    pub display_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// A page-level content record that exists exactly once.
///
/// Missing stored fields fall back to the type's defaults, so a singleton
/// that was never edited reads as its default content.
pub trait PageSingleton:
    Serialize + DeserializeOwned + Default + Validate + Send + Sync + 'static
{
    /// Storage key.
    const KEY: &'static str;

    /// Applies a partial JSON object on top of `self`. Keys not present in
    /// `patch` keep their current value.
    fn merged_with(&self, patch: serde_json::Value) -> Result<Self, serde_json::Error> {
        let mut current = serde_json::to_value(self)?;
        if let (Some(target), serde_json::Value::Object(changes)) = (current.as_object_mut(), patch)
        {
            for (key, value) in changes {
                target.insert(key, value);
            }
        }
        serde_json::from_value(current)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct HomePageContent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub subtitle: String,
    #[validate(length(max = 50))]
    pub hero_button_1_text: String,
    #[validate(length(max = 100))]
    pub hero_button_1_link: String,
    #[validate(length(max = 50))]
    pub hero_button_2_text: String,
    #[validate(length(max = 100))]
    pub hero_button_2_link: String,
}

impl Default for HomePageContent {
    fn default() -> Self {
        Self {
            title: "IT'S ALL ABOUT WHAT YOU CAN ACHIEVE".to_string(),
            subtitle: "Empower yourself to make the changes you need to make. Elite boxing training for champions.".to_string(),
            hero_button_1_text: "Start Training".to_string(),
            hero_button_1_link: "/training-schedule".to_string(),
            hero_button_2_text: "Learn More".to_string(),
            hero_button_2_link: "/about".to_string(),
        }
    }
}

impl PageSingleton for HomePageContent {
    const KEY: &'static str = "home";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AboutContent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: String,
    pub mission: String,
    #[validate(length(max = 100))]
    pub established_date: String,
    #[validate(length(max = 254))]
    pub contact_email: String,
    #[validate(length(max = 20))]
    pub contact_phone: String,
    pub address: String,
    #[validate(url)]
    pub image_url: Option<String>,
}

impl Default for AboutContent {
    fn default() -> Self {
        Self {
            title: "About Boxing Academy".to_string(),
            description: "Welcome to our premier boxing academy...".to_string(),
            mission: "To train champions and build character...".to_string(),
            established_date: String::new(),
            contact_email: "info@boxingacademy.com".to_string(),
            contact_phone: "+1 (555) 123-4567".to_string(),
            address: "123 Boxing Street, City, State 12345".to_string(),
            image_url: None,
        }
    }
}

impl PageSingleton for AboutContent {
    const KEY: &'static str = "about";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct MembershipPageContent {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 200))]
    pub subtitle: String,
    pub description: String,
    #[validate(length(max = 200))]
    pub hot_sale_title: String,
    pub hot_sale_description: String,
}

impl Default for MembershipPageContent {
    fn default() -> Self {
        Self {
            title: "CHAMPIONSHIP".to_string(),
            subtitle: "MEMBERSHIP PLANS".to_string(),
            description: "Choose the perfect training program to unleash your potential and join our championship legacy".to_string(),
            hot_sale_title: "HOT SALE - LIMITED TIME OFFER".to_string(),
            hot_sale_description: "Special discounted plans for a limited time. Don't miss this opportunity!".to_string(),
        }
    }
}

impl PageSingleton for MembershipPageContent {
    const KEY: &'static str = "membership";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SiteHeader {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub subtitle: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub background_color: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub text_color: String,
}

impl Default for SiteHeader {
    fn default() -> Self {
        Self {
            title: "Boxing Academy".to_string(),
            subtitle: String::new(),
            background_color: "#FF0000".to_string(),
            text_color: "#FFFFFF".to_string(),
        }
    }
}

impl PageSingleton for SiteHeader {
    const KEY: &'static str = "header";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct SiteFooter {
    #[validate(length(max = 200))]
    pub copyright_text: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub background_color: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub text_color: String,
}

impl Default for SiteFooter {
    fn default() -> Self {
        Self {
            copyright_text: "© 2025 Boxing Academy | All Rights Reserved".to_string(),
            background_color: "#FF0000".to_string(),
            text_color: "#FFFFFF".to_string(),
        }
    }
}

impl PageSingleton for SiteFooter {
    const KEY: &'static str = "footer";
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_singleton_defaults() {
        assert_eq!(SiteHeader::default().title, "Boxing Academy");
        assert_eq!(
            SiteFooter::default().copyright_text,
            "© 2025 Boxing Academy | All Rights Reserved"
        );
        assert_eq!(AboutContent::default().contact_email, "info@boxingacademy.com");
        assert_eq!(MembershipPageContent::default().title, "CHAMPIONSHIP");
        assert!(HomePageContent::default().validate().is_ok());
        assert!(SiteHeader::default().validate().is_ok());
    }

    #[test]
    fn test_missing_stored_fields_use_defaults() {
        let header: SiteHeader = serde_json::from_value(json!({"title": "Iron Fist Gym"})).unwrap();
        assert_eq!(header.title, "Iron Fist Gym");
        assert_eq!(header.background_color, "#FF0000");
    }

    #[test]
    fn test_merge_keeps_unpatched_fields() {
        let current = SiteFooter::default();
        let merged = current
            .merged_with(json!({"text_color": "#000000"}))
            .unwrap();
        assert_eq!(merged.text_color, "#000000");
        assert_eq!(merged.copyright_text, current.copyright_text);
    }

    #[test]
    fn test_merge_then_validate_rejects_bad_color() {
        let merged = SiteHeader::default()
            .merged_with(json!({"background_color": "red"}))
            .unwrap();
        assert!(merged.validate().is_err());
    }

    #[test]
    fn test_merge_rejects_wrong_type() {
        assert!(HomePageContent::default()
            .merged_with(json!({"title": 42}))
            .is_err());
    }

    #[test]
    fn test_gallery_category() {
        assert_eq!("team".parse::<GalleryCategory>(), Ok(GalleryCategory::Team));
        assert!("staff".parse::<GalleryCategory>().is_err());
        assert_eq!(
            serde_json::to_string(&GalleryCategory::Facility).unwrap(),
            "\"facility\""
        );
    }
}
