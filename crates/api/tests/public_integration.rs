//! Public endpoint tests.
//!
//! Tests marked as needing a database return early unless
//! `TEST_DATABASE_URL` is set.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use common::{
    app_with_chatbot, app_with_pool, body_json, create_shop_item, empty_request, json_request,
    test_config, test_pool, unique_name, with_header,
};
use domain::services::chatbot::{InMemoryKnowledgeSource, RecordingExchangeLog};
use serde_json::json;
use tower::ServiceExt;

fn offline_app() -> axum::Router {
    app_with_chatbot(
        test_config(),
        None,
        InMemoryKnowledgeSource::new(),
        Arc::new(RecordingExchangeLog::new()),
    )
}

#[tokio::test]
async fn test_liveness_and_common_headers() {
    let response = offline_app()
        .oneshot(with_header(
            empty_request(Method::GET, "/api/health/live"),
            "x-request-id",
            "req-abc-123",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers().clone();
    assert_eq!(headers["x-request-id"], "req-abc-123");
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert!(headers.contains_key("x-frame-options"));
    assert!(!headers.contains_key("strict-transport-security"));
    assert_eq!(body_json(response).await["status"], "alive");
}

#[tokio::test]
async fn test_readiness_fails_without_database() {
    let response = offline_app()
        .oneshot(empty_request(Method::GET, "/api/health/ready"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_bmi() {
    let app = offline_app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/bmi",
            json!({ "weight_kg": 70, "height_cm": 175 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["bmi"], 22.86);
    assert_eq!(body["category"], "Normal Weight");

    let invalid = app
        .oneshot(json_request(
            Method::POST,
            "/api/v1/bmi",
            json!({ "weight_kg": -1, "height_cm": 175 }),
        ))
        .await
        .unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = offline_app()
        .oneshot(empty_request(Method::GET, "/api/v1/nope"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// Database-backed

#[tokio::test]
async fn test_site_and_pages_serve_defaults() {
    let Some(pool) = test_pool().await else { return };
    let app = app_with_pool(test_config(), pool);

    let site = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/v1/site"))
        .await
        .unwrap();
    assert_eq!(site.status(), StatusCode::OK);
    let body = body_json(site).await;
    assert!(body["header"]["title"].is_string());
    assert!(body["navbar"].is_array());

    for path in [
        "/api/v1/pages/home",
        "/api/v1/pages/services",
        "/api/v1/pages/about",
        "/api/v1/pages/contact",
        "/api/v1/pages/training-schedule",
        "/api/v1/membership-plans",
        "/api/v1/chatbot/schedule",
        "/api/v1/chatbot/plans",
    ] {
        let response = app
            .clone()
            .oneshot(empty_request(Method::GET, path))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
    }
}

#[tokio::test]
async fn test_shop_filters_and_product_detail() {
    let Some(pool) = test_pool().await else { return };
    let category = unique_name("gloves");
    let cheap = create_shop_item(&pool, "Bag Gloves", &category, "29.99").await;
    let pricey = create_shop_item(&pool, "Pro Gloves", &category, "89.00").await;
    let app = app_with_pool(test_config(), pool);

    let response = app
        .clone()
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/v1/shop?category={}&sort=price_high_low", category),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], pricey.id);
    assert_eq!(items[0]["price"], "89.00");
    assert_eq!(body["filters"]["category"], category.as_str());
    assert_eq!(body["cart_count"], 0);

    let detail = app
        .clone()
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/v1/shop/products/{}", cheap.id),
        ))
        .await
        .unwrap();
    assert_eq!(detail.status(), StatusCode::OK);
    let body = body_json(detail).await;
    assert_eq!(body["item"]["name"], "Bag Gloves");
    let related: Vec<i64> = body["related"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(related, vec![pricey.id]);

    let missing = app
        .oneshot(empty_request(Method::GET, "/api/v1/shop/products/0"))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_membership_plan_detail_by_name() {
    let Some(pool) = test_pool().await else { return };
    let name = unique_name("Champion");
    let request: domain::models::membership::CreateMembershipPlanRequest =
        serde_json::from_value(json!({
            "name": name,
            "plan_type": "pro",
            "price": "79.00",
            "original_price": "99.00",
            "duration": "3_months",
            "features": "Sparring, , Open gym",
        }))
        .unwrap();
    persistence::repositories::MembershipPlanRepository::new(pool.clone())
        .create(&request)
        .await
        .unwrap();
    let app = app_with_pool(test_config(), pool);

    let response = app
        .clone()
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/v1/membership-plans/{}", name.to_uppercase()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["name"], name.as_str());
    assert_eq!(body["features_list"], json!(["Sparring", "Open gym"]));
    assert_eq!(body["duration_display"], "3 Months");
    assert_eq!(body["savings"], "20.00");
    assert_eq!(body["savings_percent"], 20);

    let missing = app
        .oneshot(empty_request(
            Method::GET,
            "/api/v1/membership-plans/no-such-plan",
        ))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
