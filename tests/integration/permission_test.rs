//! Integration tests for the admin-or-owner authorization rule.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

use helpers::{PASSWORD, TestApp};
use storefront_entity::user::UserType;

async fn get_with(app: &TestApp, path: &str, access: &str) -> helpers::TestResponse {
    app.get(path, &[("accessToken", access)]).await
}

#[tokio::test]
async fn test_owner_reads_own_order() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    let order = app.create_order(ana.id);
    let session = app.login("ana@example.com", PASSWORD).await;

    let response = get_with(&app, &format!("/api/orders/{}", order.id), &session.access).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["order"]["id"], order.id.to_string());
    assert_eq!(response.body["order"]["userId"], ana.id.to_string());
}

#[tokio::test]
async fn test_customer_cannot_read_foreign_order() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    app.create_user("bo@example.com", UserType::Customer).await;
    let order = app.create_order(ana.id);
    let session = app.login("bo@example.com", PASSWORD).await;

    let response = get_with(&app, &format!("/api/orders/{}", order.id), &session.access).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
    assert!(response.body.get("order").is_none());
}

#[tokio::test]
async fn test_admin_reads_any_order() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    app.create_user("root@example.com", UserType::Admin).await;
    let order = app.create_order(ana.id);
    let session = app.login("root@example.com", PASSWORD).await;

    let response = get_with(&app, &format!("/api/orders/{}", order.id), &session.access).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["order"]["orderNumber"], order.order_number);
}

#[tokio::test]
async fn test_anonymous_order_read_is_unauthenticated() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    let order = app.create_order(ana.id);

    let response = app.get(&format!("/api/orders/{}", order.id), &[]).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let garbage = get_with(&app, &format!("/api/orders/{}", order.id), "not-a-jwt").await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_order_does_not_leak_existence() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;
    app.create_user("root@example.com", UserType::Admin).await;
    let customer = app.login("ana@example.com", PASSWORD).await;
    let admin = app.login("root@example.com", PASSWORD).await;
    let path = format!("/api/orders/{}", Uuid::new_v4());

    let as_customer = get_with(&app, &path, &customer.access).await;
    let as_admin = get_with(&app, &path, &admin.access).await;
    let anonymous = app.get(&path, &[]).await;

    assert_eq!(as_customer.status, StatusCode::FORBIDDEN);
    assert_eq!(as_admin.status, StatusCode::NOT_FOUND);
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_profile_rules() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    let bo = app.create_user("bo@example.com", UserType::Customer).await;
    app.create_user("root@example.com", UserType::Admin).await;
    let ana_session = app.login("ana@example.com", PASSWORD).await;
    let admin_session = app.login("root@example.com", PASSWORD).await;

    let own = get_with(&app, &format!("/api/users/{}", ana.id), &ana_session.access).await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["user"]["email"], "ana@example.com");

    let other = get_with(&app, &format!("/api/users/{}", bo.id), &ana_session.access).await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    let by_admin = get_with(&app, &format!("/api/users/{}", bo.id), &admin_session.access).await;
    assert_eq!(by_admin.status, StatusCode::OK);
    assert_eq!(by_admin.body["user"]["isActive"], true);
}

#[tokio::test]
async fn test_bearer_header_is_accepted() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    let order = app.create_order(ana.id);
    let session = app.login("ana@example.com", PASSWORD).await;

    let response = app
        .request(
            "GET",
            &format!("/api/orders/{}", order.id),
            None,
            &[],
            Some(session.access.as_str()),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_token_is_not_an_access_token() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    let order = app.create_order(ana.id);
    let session = app.login("ana@example.com", PASSWORD).await;

    let response = get_with(&app, &format!("/api/orders/{}", order.id), &session.refresh).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_comes_from_token_not_store() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    let bo = app.create_user("bo@example.com", UserType::Customer).await;
    let order = app.create_order(bo.id);
    let session = app.login("ana@example.com", PASSWORD).await;

    // Deleting the caller's account does not change what their live
    // access token asserts until it expires.
    app.state.session_manager.delete_user(ana.id).await.unwrap();

    let response = get_with(&app, &format!("/api/orders/{}", order.id), &session.access).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_id_is_checked_after_authentication() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    for path in ["/api/orders/not-a-uuid", "/api/users/not-a-uuid"] {
        let anonymous = app.get(path, &[]).await;
        assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(anonymous.body["error"], "UNAUTHORIZED", "{path}");

        let signed_in = get_with(&app, path, &session.access).await;
        assert_eq!(signed_in.status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(signed_in.body["error"], "VALIDATION_ERROR", "{path}");
    }
}
