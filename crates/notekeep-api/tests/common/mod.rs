//! Shared harness for router-level tests.
//!
//! Requests go straight through the router with `oneshot`; no socket is bound.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use notekeep_api::{auth::StaticTokenResolver, build_router, config::ApiConfig, AppState};
use notekeep_core::{
    AuthUser, Error, IdentityResolver, NewNote, Note, NoteFilter, NoteOrder, NotePatch,
    NoteRepository, Result,
};
use notekeep_db::MemoryNoteRepository;

pub const ALICE: &str = "token-alice";
pub const BOB: &str = "token-bob";

pub fn resolver() -> StaticTokenResolver {
    StaticTokenResolver::parse("token-alice=alice,token-bob=bob").expect("valid token table")
}

/// Router over an empty in-memory store.
pub fn memory_app() -> Router {
    app_with(Arc::new(MemoryNoteRepository::new()), Arc::new(resolver()))
}

pub fn app_with(notes: Arc<dyn NoteRepository>, identity: Arc<dyn IdentityResolver>) -> Router {
    build_router(AppState::new(notes, identity), &ApiConfig::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    TestResponse {
        status,
        headers,
        body,
    }
}

pub async fn create(app: &Router, token: &str, body: Value) -> TestResponse {
    send(app, Method::POST, "/api/notes/create", Some(token), Some(body)).await
}

/// Create a note and return its id.
pub async fn create_titled(app: &Router, token: &str, title: &str) -> String {
    let res = create(app, token, serde_json::json!({ "title": title })).await;
    assert_eq!(res.status, StatusCode::CREATED, "create failed: {}", res.body);
    res.body["data"]["id"].as_str().unwrap().to_string()
}

/// Store whose every call fails like a lost database connection.
pub struct FailingRepository;

fn store_down() -> Error {
    Error::Internal("connection refused".to_string())
}

#[async_trait]
impl NoteRepository for FailingRepository {
    async fn create(&self, _note: NewNote) -> Result<Note> {
        Err(store_down())
    }

    async fn find_first(&self, _filter: NoteFilter) -> Result<Option<Note>> {
        Err(store_down())
    }

    async fn update(&self, _filter: NoteFilter, _patch: NotePatch) -> Result<Option<Note>> {
        Err(store_down())
    }

    async fn find_many(
        &self,
        _filter: NoteFilter,
        _order: NoteOrder,
        _skip: i64,
        _take: i64,
    ) -> Result<Vec<Note>> {
        Err(store_down())
    }

    async fn count(&self, _filter: NoteFilter) -> Result<i64> {
        Err(store_down())
    }
}

/// Identity backend that is unreachable.
pub struct FailingResolver;

#[async_trait]
impl IdentityResolver for FailingResolver {
    async fn resolve(&self, _token: &str) -> Result<Option<AuthUser>> {
        Err(store_down())
    }
}
