//! Session cart tests. Need `TEST_DATABASE_URL`.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{
    app_with_pool, body_json, create_shop_item, empty_request, session_cookie, test_config,
    test_pool, unique_name, with_header,
};
use domain::models::shop::UpdateShopItemRequest;
use persistence::repositories::ShopItemRepository;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct Visitor {
    app: Router,
    cookie: String,
}

impl Visitor {
    fn new(app: Router) -> Self {
        Self {
            app,
            cookie: format!("gym_session={}", Uuid::new_v4()),
        }
    }

    async fn send(&self, method: Method, uri: &str) -> (StatusCode, Value) {
        let request = with_header(empty_request(method, uri), "cookie", &self.cookie);
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, body_json(response).await)
    }
}

#[tokio::test]
async fn test_cart_lifecycle_and_pricing() {
    let Some(pool) = test_pool().await else { return };
    let category = unique_name("cart");
    let gloves = create_shop_item(&pool, "Bag Gloves", &category, "29.99").await;
    let wraps = create_shop_item(&pool, "Hand Wraps", &category, "15.00").await;
    let visitor = Visitor::new(app_with_pool(test_config(), pool));

    let (status, body) = visitor
        .send(Method::POST, &format!("/api/v1/cart/items/{}", gloves.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 1);

    visitor
        .send(Method::POST, &format!("/api/v1/cart/items/{}/increase", gloves.id))
        .await;
    visitor
        .send(Method::POST, &format!("/api/v1/cart/items/{}", wraps.id))
        .await;

    let (_, count) = visitor.send(Method::GET, "/api/v1/cart/count").await;
    assert_eq!(count["cart_count"], 3);

    let (status, cart) = visitor.send(Method::GET, "/api/v1/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cart["items"].as_array().unwrap().len(), 2);
    assert_eq!(cart["subtotal"], "74.98");
    assert_eq!(cart["shipping"], "15.00");
    assert_eq!(cart["tax"], "6.00");
    assert_eq!(cart["total"], "95.98");

    // Decrease at quantity 1 drops the line.
    let (status, body) = visitor
        .send(Method::POST, &format!("/api/v1/cart/items/{}/decrease", wraps.id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 0);
    assert_eq!(body["cart_count"], 2);

    let (status, _) = visitor
        .send(Method::DELETE, &format!("/api/v1/cart/items/{}", wraps.id))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, cleared) = visitor.send(Method::DELETE, "/api/v1/cart").await;
    assert_eq!(cleared["cart_count"], 0);

    let (_, cart) = visitor.send(Method::GET, "/api/v1/cart").await;
    assert_eq!(cart["shipping"], "0.00");
    assert_eq!(cart["total"], "0.00");
}

#[tokio::test]
async fn test_adding_unknown_item_is_404() {
    let Some(pool) = test_pool().await else { return };
    let visitor = Visitor::new(app_with_pool(test_config(), pool));

    let (status, _) = visitor.send(Method::POST, "/api/v1/cart/items/0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = visitor.send(Method::POST, "/api/v1/cart/items/0/increase").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deactivated_items_are_pruned() {
    let Some(pool) = test_pool().await else { return };
    let item = create_shop_item(&pool, "Headgear", &unique_name("cart"), "45.00").await;
    let visitor = Visitor::new(app_with_pool(test_config(), pool.clone()));

    visitor
        .send(Method::POST, &format!("/api/v1/cart/items/{}", item.id))
        .await;

    let deactivate: UpdateShopItemRequest =
        serde_json::from_value(json!({ "is_active": false })).unwrap();
    ShopItemRepository::new(pool)
        .update(item.id, &deactivate)
        .await
        .unwrap()
        .unwrap();

    let (_, cart) = visitor.send(Method::GET, "/api/v1/cart").await;
    assert!(cart["items"].as_array().unwrap().is_empty());

    let (_, count) = visitor.send(Method::GET, "/api/v1/cart/count").await;
    assert_eq!(count["cart_count"], 0);
}

#[tokio::test]
async fn test_session_cookie_is_issued_once() {
    let Some(pool) = test_pool().await else { return };
    let app = app_with_pool(test_config(), pool);

    let first = app
        .clone()
        .oneshot(empty_request(Method::GET, "/api/v1/cart/count"))
        .await
        .unwrap();
    let cookie = session_cookie(first.headers()).expect("session cookie");

    let second = app
        .oneshot(with_header(
            empty_request(Method::GET, "/api/v1/cart/count"),
            "cookie",
            &cookie,
        ))
        .await
        .unwrap();
    assert!(session_cookie(second.headers()).is_none());
}
