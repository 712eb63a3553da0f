//! Admin access to the page singletons.
//!
//! PUT takes a partial object; keys left out keep their stored value.

use axum::{extract::State, routing::get, Json, Router};
use domain::models::content::{
    AboutContent, HomePageContent, MembershipPageContent, PageSingleton, SiteFooter, SiteHeader,
};
use persistence::repositories::SitePageRepository;
use serde_json::Value;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::ApiJson;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/pages/home",
            get(get_page::<HomePageContent>).put(update_page::<HomePageContent>),
        )
        .route(
            "/pages/about",
            get(get_page::<AboutContent>).put(update_page::<AboutContent>),
        )
        .route(
            "/pages/membership",
            get(get_page::<MembershipPageContent>).put(update_page::<MembershipPageContent>),
        )
        .route(
            "/pages/header",
            get(get_page::<SiteHeader>).put(update_page::<SiteHeader>),
        )
        .route(
            "/pages/footer",
            get(get_page::<SiteFooter>).put(update_page::<SiteFooter>),
        )
}

async fn get_page<P: PageSingleton>(State(state): State<AppState>) -> Result<Json<P>, ApiError> {
    let page = SitePageRepository::new(state.pool.clone()).load::<P>().await?;
    Ok(Json(page))
}

async fn update_page<P: PageSingleton>(
    State(state): State<AppState>,
    ApiJson(patch): ApiJson<Value>,
) -> Result<Json<P>, ApiError> {
    let page: P = apply_patch(
        SitePageRepository::new(state.pool.clone())
            .load::<P>()
            .await?,
        patch,
    )?;

    SitePageRepository::new(state.pool.clone())
        .store(&page)
        .await?;

    info!(key = P::KEY, "Page content updated");
    Ok(Json(page))
}

/// Merges `patch` into `current` and validates the result.
fn apply_patch<P: PageSingleton>(current: P, patch: Value) -> Result<P, ApiError> {
    if !patch.is_object() {
        return Err(ApiError::Validation(
            "Page update must be a JSON object".to_string(),
        ));
    }

    let page = current
        .merged_with(patch)
        .map_err(|e| ApiError::Validation(format!("Invalid page content: {}", e)))?;
    validator::Validate::validate(&page)?;
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_keeps_unlisted_fields() {
        let current = AboutContent::default();
        let updated = apply_patch(current.clone(), json!({ "contact_phone": "+1 555 0100" }))
            .unwrap();

        assert_eq!(updated.contact_phone, "+1 555 0100");
        assert_eq!(updated.title, current.title);
        assert_eq!(updated.address, current.address);
    }

    #[test]
    fn test_patch_must_be_object() {
        let result = apply_patch(SiteHeader::default(), json!(["not", "an", "object"]));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_patch_with_wrong_type_is_rejected() {
        let result = apply_patch(HomePageContent::default(), json!({ "title": 42 }));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_patch_runs_field_validation() {
        let result = apply_patch(HomePageContent::default(), json!({ "title": "" }));
        assert!(matches!(result, Err(ApiError::Validation(_))));
    }
}
