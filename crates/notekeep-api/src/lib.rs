//! # notekeep-api
//!
//! HTTP surface for notekeep: router, middleware stack, and the wiring that
//! picks storage and identity backends from [`ApiConfig`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod response;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;
use uuid::Uuid;

use notekeep_core::{IdentityResolver, Note, NoteRepository, PaginationMeta, Result};
use notekeep_db::{log_pool_metrics, Database, MemoryNoteRepository, PoolConfig};

use crate::auth::{require_auth, StaticTokenResolver};
use crate::config::{ApiConfig, StorageKind};
use crate::handlers::{notes, system};
use crate::response::{ErrorBody, NoteListResponse};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub notes: Arc<dyn NoteRepository>,
    pub identity: Arc<dyn IdentityResolver>,
}

impl AppState {
    pub fn new(notes: Arc<dyn NoteRepository>, identity: Arc<dyn IdentityResolver>) -> Self {
        Self { notes, identity }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "notekeep API", description = "Per-user notes"),
    components(schemas(Note, PaginationMeta, NoteListResponse, ErrorBody)),
    tags((name = "notes", description = "Owner-scoped note CRUD"))
)]
pub struct ApiDoc;

/// Request ids are UUIDv7 so they sort by arrival time.
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Note routes; every one of them requires a bearer token.
fn notes_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/create", post(notes::create_note))
        .route("/update/:id", patch(notes::update_note))
        .route("/all", get(notes::list_notes))
        .route("/:id", get(notes::get_note))
        .route_layer(from_fn_with_state(state, require_auth))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

/// Full application router with the middleware stack applied.
pub fn build_router(state: AppState, config: &ApiConfig) -> Router {
    Router::new()
        .route("/health", get(system::health_check))
        .route("/openapi.json", get(system::openapi_json))
        .nest("/api/notes", notes_router(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors_layer(&config.allowed_origins))
        .layer(RequestBodyLimitLayer::new(config.max_body_bytes))
        .with_state(state)
}

/// Connect the configured storage and identity backends.
///
/// `AUTH_TOKENS`, when set, takes precedence over database sessions.
pub async fn build_state(config: &ApiConfig) -> Result<AppState> {
    let static_tokens = config
        .auth_tokens
        .as_deref()
        .map(StaticTokenResolver::parse)
        .transpose()?;

    match config.storage {
        StorageKind::Memory => {
            info!(subsystem = "api", "Using in-memory note storage");
            let identity = static_tokens.unwrap_or_default();
            Ok(AppState::new(
                Arc::new(MemoryNoteRepository::new()),
                Arc::new(identity),
            ))
        }
        StorageKind::Postgres => {
            info!(subsystem = "api", "Connecting to database...");
            let pool_config = PoolConfig::default().max_connections(config.db_max_connections);
            let db = Database::connect_with_config(&config.database_url, pool_config).await?;
            info!(subsystem = "api", "Running database migrations...");
            db.migrate().await?;
            log_pool_metrics(db.pool());

            let identity: Arc<dyn IdentityResolver> = match static_tokens {
                Some(tokens) => {
                    info!(
                        subsystem = "auth",
                        token_count = tokens.len(),
                        "Using static bearer tokens"
                    );
                    Arc::new(tokens)
                }
                None => Arc::new(db.sessions.clone()),
            };
            Ok(AppState::new(Arc::new(db.notes.clone()), identity))
        }
    }
}
