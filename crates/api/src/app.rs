use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use domain::models::cart::CartPricing;
use domain::services::chatbot::{
    AiResponder, ChatbotPipeline, CompletionClient, DomainClassifier, ExchangeLog,
    KnowledgeSource,
};
use persistence::repositories::{ChatExchangeRepository, PgKnowledgeSource};
use shared::jwt::JwtConfig;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, optional_user_auth, rate_limit_middleware,
    require_admin, security_headers_middleware, trace_id, visitor_session, RateLimiterState,
    UserAuth,
};
use crate::routes::{
    admin_catalog, admin_chat, admin_content, admin_pages, auth, bmi, cart, chatbot, health,
    membership, pages, shop,
};
use crate::services::{CookieHelper, OpenAiCompletionClient};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub jwt: Arc<JwtConfig>,
    pub chatbot: Arc<ChatbotPipeline>,
    pub pricing: CartPricing,
    pub cookies: CookieHelper,
    pub rate_limiter: Option<Arc<RateLimiterState>>,
}

impl AppState {
    /// Wires the Postgres-backed chatbot and the configured completion
    /// client, if any.
    pub fn new(config: Config, pool: PgPool) -> anyhow::Result<Self> {
        let completion = OpenAiCompletionClient::from_config(&config.chatbot)?;
        let knowledge: Arc<dyn KnowledgeSource> = Arc::new(PgKnowledgeSource::new(pool.clone()));
        let log: Arc<dyn ExchangeLog> = Arc::new(ChatExchangeRepository::new(pool.clone()));

        let chatbot = build_chatbot(&config, completion, knowledge, log);
        Self::with_chatbot(config, pool, chatbot)
    }

    /// Same as [`AppState::new`] with a caller-supplied pipeline.
    pub fn with_chatbot(
        config: Config,
        pool: PgPool,
        chatbot: ChatbotPipeline,
    ) -> anyhow::Result<Self> {
        let jwt = UserAuth::create_jwt_config(&config.jwt)?;

        Ok(Self {
            pool,
            jwt: Arc::new(jwt),
            chatbot: Arc::new(chatbot),
            pricing: config.shop.pricing(),
            cookies: CookieHelper::new(&config.session),
            rate_limiter: RateLimiterState::new(config.security.rate_limit_per_minute)
                .map(Arc::new),
            config: Arc::new(config),
        })
    }
}

/// Builds the resolution pipeline. The same client, if any, serves the
/// classifier and the responder.
pub fn build_chatbot(
    config: &Config,
    completion: Option<Arc<dyn CompletionClient>>,
    knowledge: Arc<dyn KnowledgeSource>,
    log: Arc<dyn ExchangeLog>,
) -> ChatbotPipeline {
    ChatbotPipeline::new(
        DomainClassifier::new(completion.clone()),
        AiResponder::new(completion),
        knowledge,
        log,
    )
    .with_anonymous_logging(config.chatbot.log_anonymous)
}

pub fn create_app(config: Config, pool: PgPool) -> anyhow::Result<Router> {
    Ok(create_router(AppState::new(config, pool)?))
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        // Development default: any origin
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    // Layers run bottom-up: session cookie, then optional bearer auth, then
    // the per-client limit.
    let chatbot_routes = Router::new()
        .route("/api/v1/chatbot", post(chatbot::chat))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_user_auth,
        ));

    let visitor_routes = Router::new()
        .merge(chatbot_routes)
        .merge(shop::router())
        .merge(cart::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            visitor_session,
        ));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/live", get(health::live))
        .route("/api/health/ready", get(health::ready))
        .route("/metrics", get(metrics_handler))
        .route("/api/v1/chatbot/schedule", get(chatbot::schedule))
        .route("/api/v1/chatbot/plans", get(chatbot::plans))
        .route("/api/v1/bmi", post(bmi::calculate))
        .merge(pages::router())
        .merge(membership::router())
        .nest("/api/v1/auth", auth::router(&state));

    let admin_routes = Router::new()
        .merge(admin_content::router())
        .merge(admin_catalog::router())
        .merge(admin_pages::router())
        .merge(admin_chat::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(public_routes)
        .merge(visitor_routes)
        .nest("/api/v1/admin", admin_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn_with_state(
            config.security.hsts_enabled,
            security_headers_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors_layer(&config))
        .with_state(state)
}
