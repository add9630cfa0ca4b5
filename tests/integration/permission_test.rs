//! Integration tests for policy enforcement over the HTTP surface.

mod helpers;

use http::StatusCode;
use relief_entity::user::UserRole;

use helpers::TestApp;

#[tokio::test]
async fn test_volunteer_cannot_administer_users() {
    let app = TestApp::new().await;
    let token = app
        .user_token("vol", UserRole::Volunteer, Some("Colombo"))
        .await;

    let response = app.request("GET", "/api/users", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body["error"], "FORBIDDEN");
}

#[tokio::test]
async fn test_reports_are_staff_only() {
    let app = TestApp::new().await;
    let volunteer = app
        .user_token("vol", UserRole::Volunteer, Some("Colombo"))
        .await;
    let officer = app
        .user_token("off", UserRole::Officer, Some("Colombo"))
        .await;

    let denied = app
        .request("GET", "/api/reports/summary", None, Some(&volunteer))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let allowed = app
        .request("GET", "/api/reports/summary", None, Some(&officer))
        .await;
    assert_eq!(allowed.status, StatusCode::OK);
    assert_eq!(allowed.body["data"]["district"], "Colombo");
}

#[tokio::test]
async fn test_member_without_district_is_denied() {
    let app = TestApp::new().await;
    let token = app.user_token("drifter", UserRole::Officer, None).await;

    for path in ["/api/citizens", "/api/dashboard", "/api/gnuid?district=Colombo"] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "{path}");
    }
}

#[tokio::test]
async fn test_policy_table_is_admin_only() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    let officer = app
        .user_token("off", UserRole::Officer, Some("Galle"))
        .await;

    let response = app
        .request("GET", "/api/abac/policies", None, Some(&admin))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let rows = response.body["data"].as_array().unwrap();
    assert!(rows.iter().any(|r| r["resource"] == "page:citizen" && r["action"] == "delete"));

    let response = app
        .request("GET", "/api/abac/policies", None, Some(&officer))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_check_explains_decisions() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;

    let response = app
        .request(
            "POST",
            "/api/abac/check",
            Some(serde_json::json!({
                "role": "volunteer",
                "district": "  ",
                "resource": "page:citizen",
                "action": "read",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["allowed"], false);
    assert_eq!(response.body["data"]["reason"], "predicate_rejected");

    let response = app
        .request(
            "POST",
            "/api/abac/check",
            Some(serde_json::json!({
                "role": "officer",
                "district": "Galle",
                "resource": "page:abac",
                "action": "delete",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.body["data"]["allowed"], false);
    assert_eq!(response.body["data"]["reason"], "no_policy");
}

#[tokio::test]
async fn test_check_with_unknown_resource_is_bad_request() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;

    let response = app
        .request(
            "POST",
            "/api/abac/check",
            Some(serde_json::json!({
                "role": "admin",
                "resource": "page:nope",
                "action": "read",
            })),
            Some(&admin),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
    assert!(response.body["message"].as_str().is_some_and(|m| !m.is_empty()));
}

#[tokio::test]
async fn test_my_permissions_follow_role() {
    let app = TestApp::new().await;
    let volunteer = app
        .user_token("vol", UserRole::Volunteer, Some("Galle"))
        .await;

    let response = app
        .request("GET", "/api/abac/me", None, Some(&volunteer))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let perms = response.body["data"].as_array().unwrap();
    let has = |resource: &str, action: &str| {
        perms
            .iter()
            .any(|p| p["resource"] == resource && p["action"] == action)
    };
    assert!(has("page:citizen", "create"));
    assert!(has("page:relief_request", "read"));
    assert!(!has("page:citizen", "update"));
    assert!(!has("page:user", "read"));
    assert!(!has("page:report", "read"));
}

#[tokio::test]
async fn test_branch_writes_are_admin_only() {
    let app = TestApp::new().await;
    let admin = app.user_token("root", UserRole::Admin, None).await;
    let officer = app
        .user_token("off", UserRole::Officer, Some("Galle"))
        .await;
    let body = serde_json::json!({ "name": "Galle Central", "district": "Galle" });

    let denied = app
        .request("POST", "/api/branches", Some(body.clone()), Some(&officer))
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let created = app
        .request("POST", "/api/branches", Some(body), Some(&admin))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);

    let listed = app
        .request("GET", "/api/branches", None, Some(&officer))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
}
