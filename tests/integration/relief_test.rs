//! Integration tests for citizen and relief request case handling.

mod helpers;

use http::{StatusCode, header};
use relief_entity::user::UserRole;

use helpers::TestApp;

async fn register_citizen(app: &TestApp, token: &str, nic: &str, gn: Option<&str>) -> String {
    let response = app
        .request(
            "POST",
            "/api/citizens",
            Some(serde_json::json!({
                "nic": nic,
                "full_name": "K. Perera",
                "address": "12 Temple Rd",
                "gn_division": gn,
                "household_size": 4,
            })),
            Some(token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_citizen_case_flow() {
    let app = TestApp::new().await;
    let volunteer = app
        .user_token("vol", UserRole::Volunteer, Some("Colombo"))
        .await;
    let officer = app
        .user_token("off", UserRole::Officer, Some("Colombo"))
        .await;

    let id = register_citizen(&app, &volunteer, " 852345678v ", Some("COL-05-112")).await;

    let fetched = app
        .request("GET", &format!("/api/citizens/{id}"), None, Some(&volunteer))
        .await;
    assert_eq!(fetched.body["data"]["nic"], "852345678V");
    assert_eq!(fetched.body["data"]["district"], "Colombo");
    assert_eq!(fetched.body["data"]["status"], "pending");

    let denied = app
        .request(
            "POST",
            &format!("/api/citizens/{id}/approve"),
            Some(serde_json::json!({})),
            Some(&volunteer),
        )
        .await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let approved = app
        .request(
            "POST",
            &format!("/api/citizens/{id}/approve"),
            Some(serde_json::json!({ "note": "verified at GN office" })),
            Some(&officer),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["data"]["status"], "approved");

    let again = app
        .request(
            "POST",
            &format!("/api/citizens/{id}/reject"),
            Some(serde_json::json!({ "note": "changed my mind" })),
            Some(&officer),
        )
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_duplicate_nic_conflicts() {
    let app = TestApp::new().await;
    let volunteer = app
        .user_token("vol", UserRole::Volunteer, Some("Colombo"))
        .await;

    register_citizen(&app, &volunteer, "199912345678", None).await;
    let response = app
        .request(
            "POST",
            "/api/citizens",
            Some(serde_json::json!({ "nic": "199912345678", "full_name": "Someone Else" })),
            Some(&volunteer),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_invalid_nic_and_foreign_gn_division() {
    let app = TestApp::new().await;
    let volunteer = app
        .user_token("vol", UserRole::Volunteer, Some("Colombo"))
        .await;

    let bad_nic = app
        .request(
            "POST",
            "/api/citizens",
            Some(serde_json::json!({ "nic": "12345", "full_name": "X" })),
            Some(&volunteer),
        )
        .await;
    assert_eq!(bad_nic.status, StatusCode::BAD_REQUEST);

    let foreign_gn = app
        .request(
            "POST",
            "/api/citizens",
            Some(serde_json::json!({
                "nic": "911111111X",
                "full_name": "Y",
                "gn_division": "GAL-06-009",
            })),
            Some(&volunteer),
        )
        .await;
    assert_eq!(foreign_gn.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_district_scoping_hides_other_districts() {
    let app = TestApp::new().await;
    let colombo = app
        .user_token("colombo", UserRole::Officer, Some("Colombo"))
        .await;
    let galle = app
        .user_token("galle", UserRole::Officer, Some("Galle"))
        .await;

    let id = register_citizen(&app, &colombo, "199912345678", None).await;

    let other = app
        .request("GET", &format!("/api/citizens/{id}"), None, Some(&galle))
        .await;
    assert_eq!(other.status, StatusCode::FORBIDDEN);

    let listed = app
        .request("GET", "/api/citizens", None, Some(&galle))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"]["total_items"], 0);

    let asked = app
        .request("GET", "/api/citizens?district=Colombo", None, Some(&galle))
        .await;
    assert_eq!(asked.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_relief_request_flow_and_export() {
    let app = TestApp::new().await;
    let volunteer = app
        .user_token("vol", UserRole::Volunteer, Some("Colombo"))
        .await;
    let officer = app
        .user_token("off", UserRole::Officer, Some("Colombo"))
        .await;
    let citizen_id = register_citizen(&app, &volunteer, "199912345678", None).await;

    let created = app
        .request(
            "POST",
            "/api/relief-requests",
            Some(serde_json::json!({
                "citizen_id": citizen_id,
                "category": "food",
                "description": "Dry rations for a family of four",
            })),
            Some(&volunteer),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["data"]["district"], "Colombo");
    let request_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let no_note = app
        .request(
            "POST",
            &format!("/api/relief-requests/{request_id}/reject"),
            Some(serde_json::json!({})),
            Some(&officer),
        )
        .await;
    assert_eq!(no_note.status, StatusCode::BAD_REQUEST);

    let approved = app
        .request(
            "POST",
            &format!("/api/relief-requests/{request_id}/approve"),
            Some(serde_json::json!({})),
            Some(&officer),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK);
    assert_eq!(approved.body["data"]["status"], "approved");

    let summary = app
        .request("GET", "/api/reports/summary", None, Some(&officer))
        .await;
    assert_eq!(summary.body["data"]["relief_requests"]["total"], 1);
    assert_eq!(
        summary.body["data"]["relief_requests"]["by_status"]["approved"],
        1
    );

    let export = app
        .request(
            "GET",
            "/api/reports/relief-requests/export",
            None,
            Some(&officer),
        )
        .await;
    assert_eq!(export.status, StatusCode::OK);
    let content_type = export.headers[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/csv"));
    assert!(export.headers.contains_key(header::CONTENT_DISPOSITION));

    let text = String::from_utf8(export.raw).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("id,citizen_id,category,"));
    assert!(lines[1].contains(&request_id));
}

#[tokio::test]
async fn test_request_for_unknown_citizen() {
    let app = TestApp::new().await;
    let volunteer = app
        .user_token("vol", UserRole::Volunteer, Some("Colombo"))
        .await;

    let response = app
        .request(
            "POST",
            "/api/relief-requests",
            Some(serde_json::json!({
                "citizen_id": uuid::Uuid::new_v4(),
                "category": "shelter",
                "description": "Roof damaged",
            })),
            Some(&volunteer),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_autofill_and_gn_lookup() {
    let app = TestApp::new().await;
    let volunteer = app
        .user_token("vol", UserRole::Volunteer, Some("Colombo"))
        .await;
    register_citizen(&app, &volunteer, "852345678V", Some("COL-10-047")).await;

    let hit = app
        .request(
            "GET",
            "/api/autofill/citizens/852345678v",
            None,
            Some(&volunteer),
        )
        .await;
    assert_eq!(hit.status, StatusCode::OK);
    assert_eq!(hit.body["data"]["household_size"], 4);
    assert_eq!(hit.body["data"]["gn_division"]["name"], "Kolonnawa");

    let miss = app
        .request(
            "GET",
            "/api/autofill/citizens/199912345678",
            None,
            Some(&volunteer),
        )
        .await;
    assert_eq!(miss.status, StatusCode::NOT_FOUND);

    let divisions = app
        .request("GET", "/api/gnuid?district=colombo", None, Some(&volunteer))
        .await;
    assert_eq!(divisions.status, StatusCode::OK);
    assert_eq!(divisions.body["data"].as_array().unwrap().len(), 2);

    let one = app
        .request("GET", "/api/gnuid/GAL-06-009", None, Some(&volunteer))
        .await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body["data"]["district"], "Galle");
}

#[tokio::test]
async fn test_dashboard_counts() {
    let app = TestApp::new().await;
    let volunteer = app
        .user_token("vol", UserRole::Volunteer, Some("Colombo"))
        .await;
    register_citizen(&app, &volunteer, "199912345678", None).await;

    let response = app
        .request("GET", "/api/dashboard", None, Some(&volunteer))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["district"], "Colombo");
    assert_eq!(response.body["data"]["citizens"], 1);
    assert_eq!(response.body["data"]["citizens_pending"], 1);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
}
