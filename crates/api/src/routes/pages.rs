//! Public site payloads: header/footer/navigation and the page endpoints.

use axum::{extract::State, routing::get, Json, Router};
use domain::models::content::{
    AboutContent, Event, GalleryImage, HomePageContent, NavbarItem, Service, SiteFooter,
    SiteHeader, Trainer,
};
use domain::models::schedule::ScheduleSlot;
use persistence::repositories::{
    EventRepository, GalleryImageRepository, NavbarItemRepository, ScheduleSlotRepository,
    ServiceRepository, SitePageRepository, TrainerRepository,
};
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/site", get(site))
        .route("/api/v1/pages/home", get(home))
        .route("/api/v1/pages/services", get(services))
        .route("/api/v1/pages/about", get(about))
        .route("/api/v1/pages/contact", get(contact))
        .route("/api/v1/pages/training-schedule", get(training_schedule))
}

#[derive(Debug, Serialize)]
pub struct SiteResponse {
    pub header: SiteHeader,
    pub footer: SiteFooter,
    pub navbar: Vec<NavbarItem>,
}

#[derive(Debug, Serialize)]
pub struct HomePageResponse {
    pub content: HomePageContent,
    pub gallery: Vec<GalleryImage>,
    pub trainers: Vec<Trainer>,
    pub events: Vec<Event>,
}

#[derive(Debug, Serialize)]
pub struct ServicesPageResponse {
    pub services: Vec<Service>,
}

#[derive(Debug, Serialize)]
pub struct AboutPageResponse {
    pub about: AboutContent,
    pub trainers: Vec<Trainer>,
}

#[derive(Debug, Serialize)]
pub struct ContactPageResponse {
    pub email: String,
    pub phone: String,
    pub address: String,
}

#[derive(Debug, Serialize)]
pub struct TrainingSchedulePageResponse {
    pub schedules: Vec<ScheduleSlot>,
}

/// Maps repository rows into domain models.
fn models<E, M: From<E>>(rows: Vec<E>) -> Vec<M> {
    rows.into_iter().map(M::from).collect()
}

/// GET /api/v1/site
async fn site(State(state): State<AppState>) -> Result<Json<SiteResponse>, ApiError> {
    let pages = SitePageRepository::new(state.pool.clone());
    let header = pages.load::<SiteHeader>().await?;
    let footer = pages.load::<SiteFooter>().await?;
    let navbar = NavbarItemRepository::new(state.pool.clone())
        .list_active()
        .await?;

    Ok(Json(SiteResponse {
        header,
        footer,
        navbar: models(navbar),
    }))
}

/// GET /api/v1/pages/home
async fn home(State(state): State<AppState>) -> Result<Json<HomePageResponse>, ApiError> {
    let content = SitePageRepository::new(state.pool.clone())
        .load::<HomePageContent>()
        .await?;
    let gallery = GalleryImageRepository::new(state.pool.clone())
        .list_active()
        .await?;
    let trainers = TrainerRepository::new(state.pool.clone())
        .list_active()
        .await?;
    let events = EventRepository::new(state.pool.clone())
        .list_active()
        .await?;

    Ok(Json(HomePageResponse {
        content,
        gallery: models(gallery),
        trainers: models(trainers),
        events: models(events),
    }))
}

/// GET /api/v1/pages/services
async fn services(State(state): State<AppState>) -> Result<Json<ServicesPageResponse>, ApiError> {
    let services = ServiceRepository::new(state.pool.clone())
        .list_active()
        .await?;
    Ok(Json(ServicesPageResponse {
        services: models(services),
    }))
}

/// GET /api/v1/pages/about
async fn about(State(state): State<AppState>) -> Result<Json<AboutPageResponse>, ApiError> {
    let about = SitePageRepository::new(state.pool.clone())
        .load::<AboutContent>()
        .await?;
    let trainers = TrainerRepository::new(state.pool.clone())
        .list_active()
        .await?;

    Ok(Json(AboutPageResponse {
        about,
        trainers: models(trainers),
    }))
}

/// GET /api/v1/pages/contact: contact details from the about page.
async fn contact(State(state): State<AppState>) -> Result<Json<ContactPageResponse>, ApiError> {
    let about = SitePageRepository::new(state.pool.clone())
        .load::<AboutContent>()
        .await?;

    Ok(Json(ContactPageResponse {
        email: about.contact_email,
        phone: about.contact_phone,
        address: about.address,
    }))
}

/// GET /api/v1/pages/training-schedule
async fn training_schedule(
    State(state): State<AppState>,
) -> Result<Json<TrainingSchedulePageResponse>, ApiError> {
    let slots = ScheduleSlotRepository::new(state.pool.clone())
        .list_active()
        .await?;
    Ok(Json(TrainingSchedulePageResponse {
        schedules: models(slots),
    }))
}
