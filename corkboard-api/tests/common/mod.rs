/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - An app backed by the in-memory store (no database needed)
/// - Request helpers for JSON, form and bearer-authenticated calls
/// - User registration and login

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use corkboard_api::app::{build_router, AppState};
use corkboard_api::config::{ApiConfig, Config, DatabaseConfig, JwtConfig};
use corkboard_shared::auth::authenticator::JwtAuthenticator;
use corkboard_shared::auth::password::HashParams;
use corkboard_shared::service::BoardService;
use corkboard_shared::store::memory::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &str = "test-secret-key-that-is-32-bytes-long";

/// Test context wrapping a router over a fresh in-memory store
pub struct TestContext {
    pub app: Router,
}

/// Decoded response
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            production: false,
            cors_origins: vec!["*".to_string()],
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
            access_token_expire_minutes: 30,
        },
        superuser: None,
    }
}

impl TestContext {
    pub fn new() -> Self {
        let config = test_config();
        let authenticator = JwtAuthenticator::new(JWT_SECRET, Duration::minutes(30))
            .with_hash_params(HashParams::insecure_fast());
        let service = BoardService::new(Arc::new(MemoryStore::new()), Arc::new(authenticator));

        TestContext {
            app: build_router(AppState::new(service, config)),
        }
    }

    /// Sends a request and decodes the body as JSON (`Null` when empty)
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        TestResponse { status, headers, body }
    }

    /// JSON request, optionally with a bearer token
    pub async fn json(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send(request).await
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.json(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.json(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.json(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.json(Method::PATCH, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> TestResponse {
        self.json(Method::DELETE, uri, Some(token), None).await
    }

    /// Registers `name` with `name@example.com` / `{name}-password`
    pub async fn register(&self, name: &str) -> TestResponse {
        self.json(
            Method::POST,
            "/v1/auth/register",
            None,
            Some(serde_json::json!({
                "email": format!("{}@example.com", name),
                "username": name,
                "password": format!("{}-password", name),
            })),
        )
        .await
    }

    /// Form login
    pub async fn login(&self, email: &str, password: &str) -> TestResponse {
        let form = format!("username={}&password={}", email.replace('@', "%40"), password);
        let request = Request::builder()
            .method(Method::POST)
            .uri("/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form))
            .unwrap();

        self.send(request).await
    }

    /// Registers and logs in `name`, returning the access token
    pub async fn user_token(&self, name: &str) -> String {
        let registered = self.register(name).await;
        assert_eq!(registered.status, StatusCode::CREATED, "register failed: {}", registered.body);

        let login = self.login(&format!("{}@example.com", name), &format!("{}-password", name)).await;
        assert_eq!(login.status, StatusCode::OK, "login failed: {}", login.body);

        login.body["access_token"].as_str().unwrap().to_string()
    }
}

/// Extracts the `id` field of a JSON body
pub fn id_of(body: &Value) -> String {
    body["id"].as_str().unwrap().to_string()
}
