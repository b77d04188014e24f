//! Integration tests for the login, refresh, logout, and registration flows.

mod helpers;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use helpers::{PASSWORD, TestApp};
use storefront_auth::jwt::{IdentityClaims, TokenKind};
use storefront_auth::session::TokenHash;
use storefront_database::repositories::UserRepository;
use storefront_entity::refresh_token::ClientMetadata;
use storefront_entity::user::UserType;

#[tokio::test]
async fn test_login_sets_both_cookies() {
    let app = TestApp::new();
    let user = app.create_user("ana@example.com", UserType::Customer).await;

    let response = app
        .post(
            "/api/auth/login",
            Some(json!({ "email": "ana@example.com", "password": PASSWORD })),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["id"], user.id.to_string());
    assert_eq!(response.body["user"]["email"], "ana@example.com");
    assert_eq!(response.body["user"]["role"], "customer");
    assert!(response.body.get("accessToken").is_none());

    let access = response.cookie("accessToken").expect("accessToken cookie");
    let refresh = response.cookie("refreshToken").expect("refreshToken cookie");
    assert_eq!(access.max_age, Some(15 * 60));
    assert_eq!(refresh.max_age, Some(7 * 24 * 60 * 60));
    for cookie in [&access, &refresh] {
        assert!(cookie.raw.contains("HttpOnly"));
        assert!(cookie.raw.contains("SameSite=Strict"));
        assert!(cookie.raw.contains("Path=/"));
    }

    let claims = app
        .state
        .session_manager
        .validator()
        .verify(&access.value, TokenKind::Access)
        .expect("access token verifies");
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.user_type, UserType::Customer);

    let record = app
        .tokens
        .get(TokenHash::of(&refresh.value).as_str())
        .expect("refresh token persisted");
    assert!(record.is_active);
    assert_eq!(record.user_id, user.id);
}

#[tokio::test]
async fn test_login_email_is_case_insensitive() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;

    let session = app.login("ANA@Example.com", PASSWORD).await;
    assert!(!session.access.is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    let inactive = app.create_user("off@example.com", UserType::Customer).await;
    app.create_user("ana@example.com", UserType::Customer).await;
    app.users.set_active(inactive.id, false).await.unwrap();

    let attempts = [
        json!({ "email": "ana@example.com", "password": "wrong-password-1" }),
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
        json!({ "email": "off@example.com", "password": PASSWORD }),
        json!({ "email": "", "password": "" }),
        json!({}),
    ];

    let mut bodies = Vec::new();
    for body in attempts {
        let response = app.post("/api/auth/login", Some(body), &[]).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(response.set_cookies.is_empty());
        bodies.push(response.body);
    }

    assert_eq!(bodies[0]["message"], "Invalid email or password");
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
    assert!(app.tokens.is_empty());
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new();
    let user = app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    let response = app
        .post(
            "/api/auth/refresh-token",
            None,
            &[("refreshToken", session.refresh.as_str())],
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["user"]["id"], user.id.to_string());
    assert!(response.cookie("refreshToken").is_none());

    let access = response.cookie("accessToken").expect("new accessToken");
    assert_eq!(access.max_age, Some(15 * 60));
    let claims = app
        .state
        .session_manager
        .validator()
        .verify(&access.value, TokenKind::Access)
        .expect("refreshed token verifies");
    assert_eq!(claims.user_id, user.id);

    // No rotation: the same refresh token keeps working.
    let again = app
        .post(
            "/api/auth/refresh-token",
            None,
            &[("refreshToken", session.refresh.as_str())],
        )
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_cookie_is_unauthenticated() {
    let app = TestApp::new();

    let response = app.post("/api/auth/refresh-token", None, &[]).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_refresh_rejects_access_token() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    let response = app
        .post(
            "/api/auth/refresh-token",
            None,
            &[("refreshToken", session.access.as_str())],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_after_logout_is_rejected() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    let logout = app
        .post("/api/auth/logout", None, &session.cookies())
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let revoked = app
        .post(
            "/api/auth/refresh-token",
            None,
            &[("refreshToken", session.refresh.as_str())],
        )
        .await;
    let missing = app.post("/api/auth/refresh-token", None, &[]).await;

    assert_eq!(revoked.status, StatusCode::UNAUTHORIZED);
    // A revoked token looks exactly like no token at all.
    assert_eq!(revoked.body, missing.body);
}

#[tokio::test]
async fn test_expired_refresh_token_with_live_record_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("ana@example.com", UserType::Customer).await;

    let claims = IdentityClaims::for_user(&user).unwrap();
    let issued = app
        .state
        .session_manager
        .issuer()
        .issue_refresh_token_at(&claims, Utc::now() - Duration::days(8))
        .unwrap();

    // The record itself claims to be valid for another day.
    app.state
        .refresh_store
        .persist(
            user.id,
            &TokenHash::of(issued.token.as_str()),
            Utc::now() + Duration::days(1),
            ClientMetadata::default(),
        )
        .await
        .unwrap();

    let response = app
        .post(
            "/api/auth/refresh-token",
            None,
            &[("refreshToken", issued.token.as_str())],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_for_deactivated_user_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    app.users.set_active(user.id, false).await.unwrap();

    let response = app
        .post(
            "/api/auth/refresh-token",
            None,
            &[("refreshToken", session.refresh.as_str())],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_cookie_still_clears() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    let response = app.post("/api/auth/logout", None, &[]).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Logged out successfully");
    for name in ["accessToken", "refreshToken"] {
        let cookie = response.cookie(name).expect("cleared cookie");
        assert!(cookie.value.is_empty());
        assert_eq!(cookie.max_age, Some(0));
    }

    // Nothing was presented, so nothing was revoked.
    let record = app
        .tokens
        .get(TokenHash::of(session.refresh.as_str()).as_str())
        .unwrap();
    assert!(record.is_active);
}

#[tokio::test]
async fn test_logout_invalidates_presented_token() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    let first = app.post("/api/auth/logout", None, &session.cookies()).await;
    let second = app.post("/api/auth/logout", None, &session.cookies()).await;

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);

    let record = app
        .tokens
        .get(TokenHash::of(session.refresh.as_str()).as_str())
        .unwrap();
    assert!(!record.is_active);
}

#[tokio::test]
async fn test_logout_only_ends_one_session() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;
    let laptop = app.login("ana@example.com", PASSWORD).await;
    let phone = app.login("ana@example.com", PASSWORD).await;

    app.post("/api/auth/logout", None, &laptop.cookies()).await;

    let response = app
        .post(
            "/api/auth/refresh-token",
            None,
            &[("refreshToken", phone.refresh.as_str())],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_me_with_cookie_and_bearer() {
    let app = TestApp::new();
    let user = app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    let by_cookie = app
        .get("/api/auth/me", &[("accessToken", session.access.as_str())])
        .await;
    assert_eq!(by_cookie.status, StatusCode::OK);
    assert_eq!(by_cookie.body["user"]["id"], user.id.to_string());
    assert!(by_cookie.body["user"].get("passwordHash").is_none());

    let by_bearer = app
        .request("GET", "/api/auth/me", None, &[], Some(session.access.as_str()))
        .await;
    assert_eq!(by_bearer.status, StatusCode::OK);

    let anonymous = app.get("/api/auth/me", &[]).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_access_token_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("ana@example.com", UserType::Customer).await;
    let session = app.login("ana@example.com", PASSWORD).await;

    let claims = IdentityClaims::for_user(&user).unwrap();
    let stale = app
        .state
        .session_manager
        .issuer()
        .issue_access_token_at(&claims, Utc::now() - Duration::minutes(30))
        .unwrap();

    // A live refresh cookie does not rescue a dead access token.
    let response = app
        .get(
            "/api/auth/me",
            &[("accessToken", stale.token.as_str()), ("refreshToken", session.refresh.as_str())],
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/auth/register",
            Some(json!({
                "name": "  Bo  ",
                "email": "Bo@Example.com",
                "password": PASSWORD,
            })),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["user"]["name"], "Bo");
    assert_eq!(response.body["user"]["email"], "bo@example.com");
    assert_eq!(response.body["user"]["role"], "customer");
    assert!(response.set_cookies.is_empty());

    app.login("bo@example.com", PASSWORD).await;
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;

    let response = app
        .post(
            "/api/auth/register",
            Some(json!({
                "name": "Ana Again",
                "email": "ANA@example.com",
                "password": PASSWORD,
            })),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new();

    let response = app
        .post(
            "/api/auth/register",
            Some(json!({
                "name": "Cy",
                "email": "cy@example.com",
                "password": "password",
            })),
            &[],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(app.users.is_empty());
}

#[tokio::test]
async fn test_access_token_just_past_expiry_is_rejected() {
    let app = TestApp::new();
    let user = app.create_user("ana@example.com", UserType::Customer).await;
    let issuer = app.state.session_manager.issuer();

    let claims = IdentityClaims::for_user(&user).unwrap();
    let issued_at = Utc::now() - issuer.access_ttl() - Duration::seconds(3);
    let stale = issuer.issue_access_token_at(&claims, issued_at).unwrap();

    let response = app
        .get("/api/auth/me", &[("accessToken", stale.token.as_str())])
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_login_without_body_is_generic_failure() {
    let app = TestApp::new();
    app.create_user("ana@example.com", UserType::Customer).await;

    let response = app.post("/api/auth/login", None, &[]).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Invalid email or password");
    assert!(response.cookie("accessToken").is_none());
}

#[tokio::test]
async fn test_register_with_malformed_body_is_json_validation_error() {
    let app = TestApp::new();

    let response = app
        .post("/api/auth/register", Some(json!({ "name": 42 })), &[])
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(app.users.is_empty());
}
