//! BMI calculator.

use axum::Json;
use domain::models::bmi::{BmiRequest, BmiResult};
use validator::Validate;

use crate::error::ApiError;
use crate::extractors::ApiJson;

/// POST /api/v1/bmi
pub async fn calculate(
    ApiJson(request): ApiJson<BmiRequest>,
) -> Result<Json<BmiResult>, ApiError> {
    request.validate()?;
    Ok(Json(request.compute()))
}
