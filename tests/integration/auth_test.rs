//! Integration tests for the login, refresh and logout flow.

mod helpers;

use http::StatusCode;
use relief_entity::user::{UserRole, UserStatus};

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_login_sets_refresh_cookie_only() {
    let app = TestApp::new().await;
    app.create_user("officer1", UserRole::Officer, Some("Colombo"), UserStatus::Active)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "officer1", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["data"]["access_token"].is_string());
    assert!(response.body["data"].get("refresh_token").is_none());
    assert_eq!(response.body["data"]["user"]["district"], "Colombo");

    let cookie = response.set_cookie().expect("refresh cookie");
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Path=/api/auth"));
}

#[tokio::test]
async fn test_login_invalid_password() {
    let app = TestApp::new().await;
    app.create_user("someone", UserRole::Volunteer, Some("Galle"), UserStatus::Active)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "someone", "password": "wrong-password-1" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
    assert!(response.set_cookie().is_none());
}

#[tokio::test]
async fn test_login_nonexistent_user() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "nobody", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_pending_user_cannot_login() {
    let app = TestApp::new().await;
    app.create_user("waiting", UserRole::Volunteer, None, UserStatus::Pending)
        .await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(serde_json::json!({ "username": "waiting", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_me_authenticated() {
    let app = TestApp::new().await;
    let token = app.user_token("meuser", UserRole::Admin, None).await;

    let response = app.request("GET", "/api/auth/me", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "meuser");
    assert_eq!(response.body["data"]["role"], "admin");
    assert!(response.body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_unauthenticated() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/api/auth/me", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_cookie() {
    let app = TestApp::new().await;
    app.create_user("rotator", UserRole::Officer, Some("Galle"), UserStatus::Active)
        .await;
    let session = app.login("rotator", PASSWORD).await;

    let response = app
        .request_with_cookie("POST", "/api/auth/refresh", Some(&session.refresh_cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let access = response.body["data"]["access_token"].as_str().unwrap();
    assert!(response.refresh_cookie().is_some());

    let me = app.request("GET", "/api/auth/me", None, Some(access)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["data"]["username"], "rotator");
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let app = TestApp::new().await;

    let response = app
        .request_with_cookie("POST", "/api/auth/refresh", None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body["data"].is_null());
}

#[tokio::test]
async fn test_refresh_with_tampered_cookie() {
    let app = TestApp::new().await;
    app.create_user("tamper", UserRole::Volunteer, Some("Galle"), UserStatus::Active)
        .await;
    let session = app.login("tamper", PASSWORD).await;

    let (unsigned, signature) = session.refresh_cookie.rsplit_once('.').unwrap();
    let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
    let forged = format!("{unsigned}.{flipped}{}", &signature[1..]);

    let response = app
        .request_with_cookie("POST", "/api/auth/refresh", Some(&forged))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_token_is_not_a_refresh_token() {
    let app = TestApp::new().await;
    app.create_user("mixup", UserRole::Volunteer, Some("Galle"), UserStatus::Active)
        .await;
    let session = app.login("mixup", PASSWORD).await;

    let cookie = format!("jwt={}", session.access_token);
    let response = app
        .request_with_cookie("POST", "/api/auth/refresh", Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_clears_cookie() {
    let app = TestApp::new().await;

    let response = app
        .request_with_cookie("POST", "/api/auth/logout", None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.set_cookie().expect("expired cookie");
    assert!(cookie.starts_with("jwt=;"));
    assert!(cookie.contains("Max-Age=0"));
    assert!(response.refresh_cookie().is_none());

    // A client honouring the cleared cookie has nothing left to refresh with.
    let refresh = app
        .request_with_cookie("POST", "/api/auth/refresh", Some("jwt="))
        .await;
    assert_eq!(refresh.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_deactivated_user_cannot_refresh() {
    let app = TestApp::new().await;
    let admin = app.user_token("boss", UserRole::Admin, None).await;
    let id = app
        .create_user("leaver", UserRole::Volunteer, Some("Galle"), UserStatus::Active)
        .await;
    let session = app.login("leaver", PASSWORD).await;

    let response = app
        .request("DELETE", &format!("/api/users/{id}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let refresh = app
        .request_with_cookie("POST", "/api/auth/refresh", Some(&session.refresh_cookie))
        .await;
    assert_eq!(refresh.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_creates_pending_volunteer() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({
                "username": "newcomer",
                "email": "newcomer@relief.test",
                "password": PASSWORD,
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["status"], "pending");
    assert_eq!(response.body["data"]["role"], "volunteer");
    assert!(response.body["data"]["district"].is_null());
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(serde_json::json!({ "username": "weakling", "password": "abc" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}
