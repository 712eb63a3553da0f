//! Membership plan pages.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use domain::models::content::MembershipPageContent;
use domain::models::membership::{MembershipPlan, MembershipPlanView};
use domain::services::catalog::{membership_page, MembershipPage};
use persistence::repositories::{MembershipPlanRepository, SitePageRepository};

use crate::app::AppState;
use crate::error::ApiError;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/v1/membership-plans", get(list_plans))
        .route("/api/v1/membership-plans/:name", get(plan_detail))
}

/// GET /api/v1/membership-plans
async fn list_plans(State(state): State<AppState>) -> Result<Json<MembershipPage>, ApiError> {
    let plans: Vec<MembershipPlan> = MembershipPlanRepository::new(state.pool.clone())
        .list_active()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    let content = SitePageRepository::new(state.pool.clone())
        .load::<MembershipPageContent>()
        .await?;

    Ok(Json(membership_page(plans, content)))
}

/// GET /api/v1/membership-plans/:name (case-insensitive)
async fn plan_detail(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<MembershipPlanView>, ApiError> {
    let plan = MembershipPlanRepository::new(state.pool.clone())
        .find_active_by_name(name.trim())
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Membership plan '{}' not found", name)))?;

    Ok(Json(MembershipPlan::from(plan).into()))
}
