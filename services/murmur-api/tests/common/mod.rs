//! Common test utilities for murmur-api integration tests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use murmur_api::{build_router, AppState, Config};
use murmur_auth_core::{MemorySessionStore, SessionStore, StoreError, StoreResult};
use murmur_db::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

/// Session store that can be switched off
#[derive(Default)]
pub struct SwitchableSessions {
    inner: MemorySessionStore,
    down: AtomicBool,
}

impl SwitchableSessions {
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    fn check(&self) -> StoreResult<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SessionStore for SwitchableSessions {
    async fn set(&self, token: &str, subject: &str, ttl: Duration) -> StoreResult<()> {
        self.check()?;
        self.inner.set(token, subject, ttl).await
    }

    async fn get(&self, token: &str) -> StoreResult<Option<String>> {
        self.check()?;
        self.inner.get(token).await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }
}

pub struct TestApp {
    pub router: Router,
    pub resources: MemoryStore,
    pub sessions: Arc<SwitchableSessions>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://unused".to_string()),
            _ => None,
        })
        .unwrap();

        let resources = MemoryStore::new();
        let sessions = Arc::new(SwitchableSessions::default());
        let state = AppState::new(
            config,
            Arc::new(resources.clone()),
            Arc::new(resources.clone()),
            Arc::new(resources.clone()),
            sessions.clone(),
        );

        Self {
            router: build_router(state, None),
            resources,
            sessions,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Create an account through the API and return its id
    pub async fn create_account(&self, username: &str, password: &str) -> i64 {
        let response = self
            .send(json_request(
                "POST",
                "/users",
                None,
                serde_json::json!({ "username": username, "password": password }),
            ))
            .await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["id"].as_i64().unwrap()
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        let body = format!("u={username}&p={password}");
        let request = Request::builder()
            .method("POST")
            .uri("/login")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Log in and return the bearer token
    pub async fn token(&self, username: &str, password: &str) -> String {
        let response = self.login(username, password).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body["Token"].as_str().unwrap().to_string()
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub fn request(method: &str, uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(
    method: &str,
    uri: &str,
    authorization: Option<&str>,
    body: Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(value) = authorization {
        builder = builder.header("authorization", value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
