//! Integration tests for user administration.

mod helpers;

use http::StatusCode;
use relief_entity::user::{UserRole, UserStatus};

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_approve_with_blank_district_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    let id = app
        .create_user("pending1", UserRole::Volunteer, None, UserStatus::Pending)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/users/{id}/approve"),
            Some(serde_json::json!({ "district": "   " })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["message"],
        "District is required to approve a volunteer"
    );

    let user = app.stores.users.find_by_id(id).await.unwrap().unwrap();
    assert_eq!(user.status, UserStatus::Pending);
}

#[tokio::test]
async fn test_approve_trims_district_and_enables_login() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    let id = app
        .create_user("pending2", UserRole::Volunteer, None, UserStatus::Pending)
        .await;

    let response = app
        .request(
            "POST",
            &format!("/api/users/{id}/approve"),
            Some(serde_json::json!({ "district": "  Galle  " })),
            Some(&admin),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "active");
    assert_eq!(response.body["data"]["district"], "Galle");

    let session = app.login("pending2", PASSWORD).await;
    assert!(!session.access_token.is_empty());
}

#[tokio::test]
async fn test_approve_twice_conflicts() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    let id = app
        .create_user("pending3", UserRole::Volunteer, None, UserStatus::Pending)
        .await;
    let path = format!("/api/users/{id}/approve");
    let body = serde_json::json!({ "district": "Colombo" });

    let first = app
        .request("POST", &path, Some(body.clone()), Some(&admin))
        .await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.request("POST", &path, Some(body), Some(&admin)).await;
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_soft_delete_hides_user_from_active_list() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    let id = app
        .create_user("temp", UserRole::Officer, Some("Galle"), UserStatus::Active)
        .await;

    let response = app
        .request("DELETE", &format!("/api/users/{id}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "inactive");

    let active = app
        .request("GET", "/api/users/active", None, Some(&admin))
        .await;
    assert_eq!(active.status, StatusCode::OK);
    let ids: Vec<&str> = active.body["data"]["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["id"].as_str())
        .collect();
    assert!(!ids.contains(&id.to_string().as_str()));

    // The row is still there.
    let fetched = app
        .request("GET", &format!("/api/users/{id}"), None, Some(&admin))
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["status"], "inactive");
}

#[tokio::test]
async fn test_admin_cannot_deactivate_self() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    let me = app.request("GET", "/api/auth/me", None, Some(&admin)).await;
    let id = me.body["data"]["id"].as_str().unwrap();

    let response = app
        .request("DELETE", &format!("/api/users/{id}"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reactivate_user() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    let id = app
        .create_user("back", UserRole::Volunteer, Some("Colombo"), UserStatus::Inactive)
        .await;

    let response = app
        .request("POST", &format!("/api/users/{id}/activate"), None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "active");
}

#[tokio::test]
async fn test_change_role_applies_at_next_login() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    let id = app
        .create_user("climber", UserRole::Volunteer, Some("Galle"), UserStatus::Active)
        .await;

    let response = app
        .request(
            "PUT",
            &format!("/api/users/{id}/role"),
            Some(serde_json::json!({ "role": "officer" })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["role"], "officer");

    let session = app.login("climber", PASSWORD).await;
    let summary = app
        .request(
            "GET",
            "/api/reports/summary",
            None,
            Some(&session.access_token),
        )
        .await;
    assert_eq!(summary.status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_creates_active_user() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;

    let response = app
        .request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "username": "fieldofficer",
                "password": PASSWORD,
                "role": "officer",
                "district": " Matara ",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["data"]["status"], "active");
    assert_eq!(response.body["data"]["district"], "Matara");

    let duplicate = app
        .request(
            "POST",
            "/api/users",
            Some(serde_json::json!({
                "username": "FieldOfficer",
                "password": PASSWORD,
                "role": "officer",
                "district": "Matara",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_change_own_password() {
    let app = TestApp::new().await;
    let token = app
        .user_token("changer", UserRole::Volunteer, Some("Galle"))
        .await;
    let new_password = "Brand-New-Secret-77";

    let wrong = app
        .request(
            "PUT",
            "/api/users/me/password",
            Some(serde_json::json!({
                "current_password": "not-the-password-1",
                "new_password": new_password,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::BAD_REQUEST);

    let ok = app
        .request(
            "PUT",
            "/api/users/me/password",
            Some(serde_json::json!({
                "current_password": PASSWORD,
                "new_password": new_password,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(ok.status, StatusCode::OK);

    let session = app.login("changer", new_password).await;
    assert!(!session.access_token.is_empty());
}

#[tokio::test]
async fn test_list_users_filters_by_status() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    app.create_user("p1", UserRole::Volunteer, None, UserStatus::Pending)
        .await;
    app.create_user("p2", UserRole::Volunteer, None, UserStatus::Pending)
        .await;

    let response = app
        .request("GET", "/api/users?status=pending", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total_items"], 2);
}

#[tokio::test]
async fn test_page_far_past_the_end_is_empty() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;

    let response = app
        .request(
            "GET",
            "/api/users?page=18446744073709551615&page_size=100",
            None,
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["items"].as_array().unwrap().len(), 0);
    assert_eq!(response.body["data"]["total_items"], 1);
}
