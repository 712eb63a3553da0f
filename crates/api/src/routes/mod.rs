//! HTTP route handlers.

use shared::money::Money;
use shared::validation::validate_price;

use crate::error::ApiError;

/// Generates list/get/create/update/delete handlers for one admin record
/// type, plus a `router()` mounting them under `$path`.
///
/// The repository must expose `list_all`, `find_by_id`, `create`, `update`
/// and `delete` over `i64` ids, and its entity must convert into `$model`.
macro_rules! admin_crud_routes {
    (
        $name:ident {
            path: $path:literal,
            label: $label:literal,
            repo: $repo:ident,
            model: $model:ty,
            create: $create:ty,
            update: $update:ty $(,)?
        }
    ) => {
        pub mod $name {
            #[allow(unused_imports)]
            use super::*;

            use axum::{
                extract::{Path, State},
                http::StatusCode,
                routing::get,
                Json, Router,
            };
            use persistence::repositories::$repo;
            use tracing::info;
            use validator::Validate;

            use $crate::app::AppState;
            use $crate::error::ApiError;
            use $crate::extractors::ApiJson;
            use $crate::routes::{ensure_non_negative, PricedRequest};

            pub fn router() -> Router<AppState> {
                Router::new()
                    .route($path, get(list).post(create))
                    .route(
                        concat!($path, "/:id"),
                        get(fetch).put(update).delete(remove),
                    )
            }

            fn not_found(id: i64) -> ApiError {
                ApiError::NotFound(format!("{} {} not found", $label, id))
            }

            /// All records, including inactive ones.
            async fn list(State(state): State<AppState>) -> Result<Json<Vec<$model>>, ApiError> {
                let records = $repo::new(state.pool.clone())
                    .list_all()
                    .await?
                    .into_iter()
                    .map(<$model>::from)
                    .collect();
                Ok(Json(records))
            }

            async fn fetch(
                State(state): State<AppState>,
                Path(id): Path<i64>,
            ) -> Result<Json<$model>, ApiError> {
                let record = $repo::new(state.pool.clone())
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| not_found(id))?;
                Ok(Json(record.into()))
            }

            async fn create(
                State(state): State<AppState>,
                ApiJson(request): ApiJson<$create>,
            ) -> Result<(StatusCode, Json<$model>), ApiError> {
                request.validate()?;
                ensure_non_negative(request.priced_fields())?;

                let record: $model = $repo::new(state.pool.clone())
                    .create(&request)
                    .await?
                    .into();

                info!(id = record.id, kind = $label, "Admin record created");
                Ok((StatusCode::CREATED, Json(record)))
            }

            async fn update(
                State(state): State<AppState>,
                Path(id): Path<i64>,
                ApiJson(request): ApiJson<$update>,
            ) -> Result<Json<$model>, ApiError> {
                request.validate()?;
                ensure_non_negative(request.priced_fields())?;

                let record: $model = $repo::new(state.pool.clone())
                    .update(id, &request)
                    .await?
                    .ok_or_else(|| not_found(id))?
                    .into();

                info!(id, kind = $label, "Admin record updated");
                Ok(Json(record))
            }

            async fn remove(
                State(state): State<AppState>,
                Path(id): Path<i64>,
            ) -> Result<StatusCode, ApiError> {
                let deleted = $repo::new(state.pool.clone()).delete(id).await?;
                if deleted == 0 {
                    return Err(not_found(id));
                }

                info!(id, kind = $label, "Admin record deleted");
                Ok(StatusCode::NO_CONTENT)
            }
        }
    };
}

pub mod admin_catalog;
pub mod admin_chat;
pub mod admin_content;
pub mod admin_pages;
pub mod auth;
pub mod bmi;
pub mod cart;
pub mod chatbot;
pub mod health;
pub mod membership;
pub mod pages;
pub mod shop;

/// Money fields an admin write carries, by field name.
pub trait PricedRequest {
    fn priced_fields(&self) -> Vec<(&'static str, Money)> {
        Vec::new()
    }
}

/// Rejects negative amounts with the offending field in the message.
pub fn ensure_non_negative(fields: Vec<(&'static str, Money)>) -> Result<(), ApiError> {
    for (field, amount) in fields {
        if let Err(e) = validate_price(&amount) {
            let reason = e
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "invalid amount".to_string());
            return Err(ApiError::Validation(format!("{}: {}", field, reason)));
        }
    }
    Ok(())
}
