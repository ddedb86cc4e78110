#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use finboard::auth::{SessionClaims, SessionKeys};
use finboard::config::AppConfig;
use finboard::database::{DatabaseError, MemoryUserStore, User, UserStore};
use finboard::{build_router, AppState};

pub const SECRET: &str = "integration-test-secret";

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.auth.session_secret = SECRET.to_string();
    config.auth.provider_url = Some("https://accounts.example.com/sign-in".to_string());
    config.assets.static_dir = "public/static".to_string();
    config
}

pub fn app_with_store(store: Arc<dyn UserStore>) -> Router {
    let state = AppState::new(test_config(), store).expect("test config has a session secret");
    build_router(state)
}

pub fn app_with_users(users: Vec<User>) -> Router {
    app_with_store(Arc::new(MemoryUserStore::with_users(users)))
}

pub fn app() -> Router {
    app_with_users(Vec::new())
}

/// Token as the identity provider would issue it
pub fn session_token(name: &str) -> String {
    SessionKeys::new(SECRET)
        .and_then(|keys| keys.issue(&SessionClaims::new(Uuid::new_v4(), name, 1)))
        .expect("token issues with test secret")
}

pub async fn send(app: &Router, request: Request<Body>) -> Result<Response<Body>> {
    Ok(app.clone().oneshot(request).await?)
}

/// GET without credentials
pub async fn get(app: &Router, uri: &str) -> Result<Response<Body>> {
    send(app, Request::builder().uri(uri).body(Body::empty())?).await
}

/// GET with the session cookie set
pub async fn get_signed_in(app: &Router, uri: &str, token: &str) -> Result<Response<Body>> {
    let request = Request::builder()
        .uri(uri)
        .header(header::COOKIE, format!("__session={}", token))
        .body(Body::empty())?;
    send(app, request).await
}

/// GET with an Authorization: Bearer header
pub async fn get_bearer(app: &Router, uri: &str, token: &str) -> Result<Response<Body>> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())?;
    send(app, request).await
}

pub fn location(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn set_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub async fn body_string(response: Response<Body>) -> Result<String> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub async fn body_json(response: Response<Body>) -> Result<Value> {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Store whose backend is unreachable
pub struct UnreachableStore;

#[async_trait]
impl UserStore for UnreachableStore {
    async fn list_newest_first(&self) -> Result<Vec<User>, DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Err(DatabaseError::Unavailable("connection refused".to_string()))
    }
}
