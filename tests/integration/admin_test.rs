//! Integration tests for back-office user management and health.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, Session, TestApp};
use storefront_entity::user::UserType;

async fn admin_session(app: &TestApp) -> (uuid::Uuid, Session) {
    let admin = app.create_user("root@example.com", UserType::Admin).await;
    (admin.id, app.login("root@example.com", PASSWORD).await)
}

#[tokio::test]
async fn test_list_users_requires_admin() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;
    let (_, admin) = admin_session(&app).await;
    let customer = app.login("ana@example.com", PASSWORD).await;

    let anonymous = app.get("/api/admin/users", &[]).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forbidden = app
        .get("/api/admin/users", &[("accessToken", customer.access.as_str())])
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let listed = app
        .get(
            "/api/admin/users?page=1&perPage=10",
            &[("accessToken", admin.access.as_str())],
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["users"].as_array().unwrap().len(), 2);
    assert_eq!(listed.body["perPage"], 10);
}

#[tokio::test]
async fn test_deactivation_revokes_sessions() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    let (_, admin) = admin_session(&app).await;
    let ana_session = app.login("ana@example.com", PASSWORD).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/users/{}/status", ana.id),
            Some(json!({ "isActive": false })),
            &[("accessToken", admin.access.as_str())],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["isActive"], false);

    assert!(
        app.tokens
            .records_for_user(ana.id)
            .iter()
            .all(|r| !r.is_active)
    );

    let refresh = app
        .post(
            "/api/auth/refresh-token",
            None,
            &[("refreshToken", ana_session.refresh.as_str())],
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);

    let login = app
        .post(
            "/api/auth/login",
            Some(json!({ "email": "ana@example.com", "password": PASSWORD })),
            &[],
        )
        .await;
    assert_eq!(login.status, StatusCode::UNAUTHORIZED);

    let reactivate = app
        .request(
            "PATCH",
            &format!("/api/admin/users/{}/status", ana.id),
            Some(json!({ "isActive": true })),
            &[("accessToken", admin.access.as_str())],
            None,
        )
        .await;
    assert_eq!(reactivate.status, StatusCode::OK);
    app.login("ana@example.com", PASSWORD).await;
}

#[tokio::test]
async fn test_admin_cannot_deactivate_self() {
    let app = TestApp::new();
    let (admin_id, admin) = admin_session(&app).await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/admin/users/{admin_id}/status"),
            Some(json!({ "isActive": false })),
            &[("accessToken", admin.access.as_str())],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_user() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    let (_, admin) = admin_session(&app).await;
    let ana_session = app.login("ana@example.com", PASSWORD).await;
    let path = format!("/api/admin/users/{}", ana.id);

    let deleted = app
        .request("DELETE", &path, None, &[("accessToken", admin.access.as_str())], None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["message"], "User deleted");

    let again = app
        .request("DELETE", &path, None, &[("accessToken", admin.access.as_str())], None)
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let refresh = app
        .post(
            "/api/auth/refresh-token",
            None,
            &[("refreshToken", ana_session.refresh.as_str())],
        )
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);

    let me = app
        .get("/api/auth/me", &[("accessToken", ana_session.access.as_str())])
        .await;
    assert_eq!(me.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_cannot_delete_self() {
    let app = TestApp::new();
    let (admin_id, admin) = admin_session(&app).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{admin_id}"),
            None,
            &[("accessToken", admin.access.as_str())],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(app.users.len(), 1);
}

#[tokio::test]
async fn test_customer_cannot_delete() {
    let app = TestApp::new();
    let ana = app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{}", ana.id),
            None,
            &[("accessToken", session.access.as_str())],
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(app.users.len(), 1);
}

#[tokio::test]
async fn test_health_reports_memory_backend() {
    let app = TestApp::new();

    let response = app.get("/api/health", &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], "memory");
}

#[tokio::test]
async fn test_admin_routes_authorize_before_parsing() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;
    let (_, admin) = admin_session(&app).await;
    let customer = app.login("ana@example.com", PASSWORD).await;
    let path = "/api/admin/users/not-a-uuid/status";

    let anonymous = app
        .request("PATCH", path, Some(json!({ "isActive": "nope" })), &[], None)
        .await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let forbidden = app
        .request(
            "PATCH",
            path,
            Some(json!({ "isActive": "nope" })),
            &[("accessToken", customer.access.as_str())],
            None,
        )
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let invalid = app
        .request(
            "PATCH",
            path,
            Some(json!({ "isActive": false })),
            &[("accessToken", admin.access.as_str())],
            None,
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.body["error"], "VALIDATION_ERROR");

    let bad_query = app
        .get(
            "/api/admin/users?page=abc",
            &[("accessToken", customer.access.as_str())],
        )
        .await;
    assert_eq!(bad_query.status, StatusCode::FORBIDDEN);
}
