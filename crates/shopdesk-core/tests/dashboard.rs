//! Dashboard flows against a scripted API.

use std::sync::Arc;

use serde_json::json;
use shopdesk_core::prelude::*;
use shopdesk_data::testing::MockTransport;
use shopdesk_data::Method;

fn setup() -> (Arc<MockTransport>, ShopApp) {
    let transport = Arc::new(MockTransport::new());
    let app = ShopApp::new(AppConfig::new("https://api.test/v1"), transport.clone()).unwrap();
    (transport, app)
}

fn last_toast(app: &ShopApp) -> (Severity, String) {
    let toast = app.toaster().active()[0];
    (toast.severity, toast.message.clone())
}

#[tokio::test]
async fn save_product_creates_then_updates() {
    let (transport, mut app) = setup();
    app.navigate("/dashboard/products/add");
    assert!(app.layout().is_dashboard());

    transport.push_json(
        201,
        &json!({ "id": "11", "name": "Desk", "price": "120", "description": "Oak", "category": "Office" }),
    );
    let created = app
        .save_product(Product::new("Desk", 120.0, "Oak", "Office"))
        .await
        .unwrap();
    assert_eq!(created.id, Some(ProductId::new(11)));
    assert_eq!(transport.last_request().unwrap().method(), Method::Post);
    assert_eq!(
        last_toast(&app),
        (Severity::Success, "Product created successfully".to_string())
    );

    transport.push_json(
        200,
        &json!({ "id": "11", "name": "Desk", "price": "99", "description": "Oak", "category": "Office" }),
    );
    let mut edited = created.clone();
    edited.price = 99.0;
    app.save_product(edited).await.unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method(), Method::Put);
    assert_eq!(sent.url(), "https://api.test/v1/products/11");
    assert_eq!(app.catalog().len(), 1);
    assert_eq!(app.catalog()[0].price, 99.0);
}

#[tokio::test]
async fn failed_save_reports_and_returns_error() {
    let (transport, mut app) = setup();
    transport.push_json(400, &json!({ "error": "name required" }));

    let err = app
        .save_user(User::new("", "nobody@example.com"))
        .await
        .unwrap_err();

    assert_eq!(err.as_fetch().and_then(|e| e.status()), Some(400));
    assert!(app.users().is_empty());
    assert_eq!(
        last_toast(&app),
        (Severity::Error, "Failed to create user".to_string())
    );
}

#[tokio::test]
async fn list_then_remove_user() {
    let (transport, mut app) = setup();
    transport.push_json(
        200,
        &json!([
            { "id": "1", "name": "Ada", "email": "ada@example.com", "avatar": "https://cdn.test/ada.png" },
            { "id": "2", "name": "Grace", "email": "grace@example.com" }
        ]),
    );
    transport.push_json(200, &json!({ "id": "1", "name": "Ada", "email": "ada@example.com" }));

    app.navigate("/dashboard/users");
    assert_eq!(app.list_users().await.unwrap().len(), 2);

    app.remove_user(UserId::new(1)).await.unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method(), Method::Delete);
    assert_eq!(sent.url(), "https://api.test/v1/users/1");
    assert_eq!(app.users().len(), 1);
    assert_eq!(app.users()[0].name, "Grace");
}

#[tokio::test]
async fn failed_delete_propagates() {
    let (transport, mut app) = setup();
    transport.push_json(200, &json!([{ "id": "5", "name": "Lamp", "price": 10, "category": "Home" }]));
    transport.push_json(404, &"Not found");

    app.load_products().await.unwrap();
    let err = app.remove_product(ProductId::new(5)).await.unwrap_err();

    assert!(err.as_fetch().is_some_and(|e| e.is_not_found()));
    assert_eq!(app.catalog().len(), 1);
    assert_eq!(last_toast(&app).0, Severity::Error);
}

#[tokio::test]
async fn routed_user_edit() {
    let (transport, mut app) = setup();
    transport.push_json(200, &json!({ "id": "3", "name": "Linus", "email": "linus@example.com" }));
    transport.push_json(200, &json!({ "id": "3", "name": "Linus T", "email": "linus@example.com" }));

    app.navigate("/dashboard/users/edit/3");
    let id = app.route_id::<UserId>().unwrap();
    let mut user = app.open_user(id).await.unwrap();
    user.name = "Linus T".to_string();
    let saved = app.save_user(user).await.unwrap();

    assert_eq!(saved.name, "Linus T");
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method(), Method::Put);
    assert_eq!(sent.url(), "https://api.test/v1/users/3");
    let body: User = sent.json_body().unwrap();
    assert_eq!(body.name, "Linus T");
}
