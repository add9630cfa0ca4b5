//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use relief_auth::PasswordHasher;
use relief_core::config::{AppConfig, AuthConfig, DatabaseConfig};
use relief_database::Stores;
use relief_entity::geo::GnDivision;
use relief_entity::user::{CreateUser, UserRole, UserStatus};

/// Password every seeded account uses.
pub const PASSWORD: &str = "Relief-Desk-2024!";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Stores behind the router, for direct seeding
    pub stores: Stores,
    /// Application config
    pub config: AppConfig,
}

fn divisions() -> Vec<GnDivision> {
    [
        ("COL-05-112", "Kotahena East", "Colombo", "Colombo"),
        ("COL-10-047", "Kolonnawa", "Kolonnawa", "Colombo"),
        ("GAL-06-009", "Galle Fort", "Galle Four Gravets", "Galle"),
    ]
    .into_iter()
    .map(|(code, name, ds, district)| GnDivision {
        code: code.into(),
        name: name.into(),
        ds_division: ds.into(),
        district: district.into(),
    })
    .collect()
}

impl TestApp {
    /// Create a new test application over in-memory stores
    pub async fn new() -> Self {
        let mut auth = AuthConfig::with_secrets("a".repeat(40), "b".repeat(40));
        auth.argon2_memory_kib = 1024;
        auth.argon2_iterations = 1;
        let config = AppConfig::new(DatabaseConfig::with_url("postgres://unused"), auth);

        let stores = Stores::in_memory(divisions());
        let router = relief_api::build_app(config.clone(), stores.clone())
            .expect("Failed to build app");

        Self {
            router,
            stores,
            config,
        }
    }

    /// Create a user directly in the store and return their ID
    pub async fn create_user(
        &self,
        username: &str,
        role: UserRole,
        district: Option<&str>,
        status: UserStatus,
    ) -> Uuid {
        let hasher = PasswordHasher::new(&self.config.auth).expect("Failed to build hasher");
        let user = self
            .stores
            .users
            .create(&CreateUser {
                username: username.into(),
                email: Some(format!("{username}@relief.test")),
                password_hash: hasher.hash_password(PASSWORD).expect("Failed to hash"),
                full_name: Some(username.into()),
                role,
                district: district.map(str::to_string),
                status,
            })
            .await
            .expect("Failed to create test user");
        user.id
    }

    /// Seed an active user and return a fresh access token
    pub async fn user_token(&self, username: &str, role: UserRole, district: Option<&str>) -> String {
        self.create_user(username, role, district, UserStatus::Active)
            .await;
        self.login(username, PASSWORD).await.access_token
    }

    /// Login and return the access token and refresh cookie
    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        LoginOutcome {
            access_token: response.body["data"]["access_token"]
                .as_str()
                .expect("No access_token in login response")
                .to_string(),
            refresh_cookie: response
                .refresh_cookie()
                .expect("No refresh cookie in login response"),
        }
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.send(method, path, body, token, None).await
    }

    /// Make an HTTP request carrying a `Cookie` header
    pub async fn request_with_cookie(
        &self,
        method: &str,
        path: &str,
        cookie: Option<&str>,
    ) -> TestResponse {
        self.send(method, path, None, None, cookie).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if body.is_some() {
            req = req.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let raw = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();
        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
            raw,
        }
    }
}

/// Access token plus the `name=value` refresh cookie from a login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Bearer access token
    pub access_token: String,
    /// `jwt=<token>` pair, ready for a `Cookie` header
    pub refresh_cookie: String,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body (`Null` when the body is not JSON)
    pub body: Value,
    /// Raw body bytes
    pub raw: Vec<u8>,
}

impl TestResponse {
    /// The full `Set-Cookie` header for the refresh cookie, if any.
    pub fn set_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("jwt="))
            .map(str::to_string)
    }

    /// The `jwt=<token>` pair from `Set-Cookie`, if a non-empty one was set.
    pub fn refresh_cookie(&self) -> Option<String> {
        let set = self.set_cookie()?;
        let pair = set.split(';').next()?.trim().to_string();
        (pair != "jwt=").then_some(pair)
    }
}
