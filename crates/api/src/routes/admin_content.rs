//! Admin CRUD for site content records.

use domain::models::content::{
    CreateEventRequest, CreateGalleryImageRequest, CreateNavbarItemRequest,
    CreateServiceRequest, CreateTrainerRequest, Event, GalleryImage, NavbarItem, Service, Trainer,
    UpdateEventRequest, UpdateGalleryImageRequest, UpdateNavbarItemRequest,
    UpdateServiceRequest, UpdateTrainerRequest,
};
use shared::money::Money;

use crate::app::AppState;
use crate::routes::PricedRequest;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(services::router())
        .merge(trainers::router())
        .merge(events::router())
        .merge(navbar_items::router())
        .merge(gallery_images::router())
}

impl PricedRequest for CreateServiceRequest {}
impl PricedRequest for UpdateServiceRequest {}
impl PricedRequest for CreateTrainerRequest {}
impl PricedRequest for UpdateTrainerRequest {}
impl PricedRequest for CreateNavbarItemRequest {}
impl PricedRequest for UpdateNavbarItemRequest {}
impl PricedRequest for CreateGalleryImageRequest {}
impl PricedRequest for UpdateGalleryImageRequest {}

impl PricedRequest for CreateEventRequest {
    fn priced_fields(&self) -> Vec<(&'static str, Money)> {
        self.price.map(|p| ("price", p)).into_iter().collect()
    }
}

impl PricedRequest for UpdateEventRequest {
    fn priced_fields(&self) -> Vec<(&'static str, Money)> {
        self.price.map(|p| ("price", p)).into_iter().collect()
    }
}

admin_crud_routes!(services {
    path: "/services",
    label: "Service",
    repo: ServiceRepository,
    model: Service,
    create: CreateServiceRequest,
    update: UpdateServiceRequest,
});

admin_crud_routes!(trainers {
    path: "/trainers",
    label: "Trainer",
    repo: TrainerRepository,
    model: Trainer,
    create: CreateTrainerRequest,
    update: UpdateTrainerRequest,
});

admin_crud_routes!(events {
    path: "/events",
    label: "Event",
    repo: EventRepository,
    model: Event,
    create: CreateEventRequest,
    update: UpdateEventRequest,
});

admin_crud_routes!(navbar_items {
    path: "/navbar-items",
    label: "Navbar item",
    repo: NavbarItemRepository,
    model: NavbarItem,
    create: CreateNavbarItemRequest,
    update: UpdateNavbarItemRequest,
});

admin_crud_routes!(gallery_images {
    path: "/gallery-images",
    label: "Gallery image",
    repo: GalleryImageRepository,
    model: GalleryImage,
    create: CreateGalleryImageRequest,
    update: UpdateGalleryImageRequest,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_price_is_checked_only_when_present() {
        let free: CreateEventRequest = serde_json::from_value(serde_json::json!({
            "title": "Open sparring",
            "date": "Every Saturday",
        }))
        .unwrap();
        assert!(free.priced_fields().is_empty());

        let paid: UpdateEventRequest =
            serde_json::from_value(serde_json::json!({ "price": "-5.00" })).unwrap();
        assert_eq!(paid.priced_fields(), vec![("price", Money::from_cents(-500))]);
    }
}
