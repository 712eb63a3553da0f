//! Member signup, login and profile endpoints.
//!
//! Tokens are stateless, so logout happens on the client.

use axum::{
    extract::State,
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use domain::models::user::{AuthResponse, LoginRequest, SignupRequest, User};
use persistence::repositories::UserRepository;
use shared::password::{check_password_policy, hash_password, verify_password};
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{ApiJson, UserAuth};
use crate::middleware::require_user_auth;

const INVALID_CREDENTIALS: &str = "Invalid username or password";

pub fn router(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route(
            "/me",
            get(me).route_layer(middleware::from_fn_with_state(
                state.clone(),
                require_user_auth,
            )),
        )
}

fn issue_token(state: &AppState, user: User) -> Result<AuthResponse, ApiError> {
    let (access_token, _jti) = state
        .jwt
        .generate_access_token(user.id, &user.username)
        .map_err(|e| ApiError::Internal(format!("Token error: {}", e)))?;

    Ok(AuthResponse {
        user,
        access_token,
        token_type: "Bearer",
        expires_in: state.jwt.access_token_expiry_secs,
    })
}

/// Create a member account and sign it in.
///
/// POST /api/v1/auth/signup
async fn signup(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    request.validate()?;
    check_password_policy(&request.password, &request.username)?;

    let password_hash = hash_password(&request.password)?;

    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .create_user(request.username.trim(), &password_hash)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => ApiError::Conflict("Username is already taken".to_string()),
            other => other,
        })?;

    info!(user_id = %user.id, "Member signed up");

    let response = issue_token(&state, user.into())?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange a username and password for an access token.
///
/// POST /api/v1/auth/login
async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    request.validate()?;

    let repo = UserRepository::new(state.pool.clone());
    let Some(entity) = repo.find_by_username(request.username.trim()).await? else {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    };

    if !verify_password(&request.password, &entity.password_hash)? || !entity.is_active {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let now = Utc::now();
    repo.update_last_login(entity.id, now).await?;

    let mut user = User::from(entity);
    user.last_login_at = Some(now);

    info!(user_id = %user.id, "Member logged in");

    Ok(Json(issue_token(&state, user)?))
}

/// The member behind the bearer token.
///
/// GET /api/v1/auth/me
async fn me(State(state): State<AppState>, auth: UserAuth) -> Result<Json<User>, ApiError> {
    let user = UserRepository::new(state.pool.clone())
        .find_by_id(auth.user_id)
        .await?
        .filter(|u| u.is_active)
        .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

    Ok(Json(user.into()))
}
