//! HTTP API for Userbase.
//!
//! Routes live under `/v1`:
//! - `GET  /v1/health`
//! - `POST /v1/users`
//! - `GET  /v1/users` (cursor-paginated, searchable)
//! - `GET  /v1/users/{id}`
//!
//! The store is handed to [`build_router`] through [`AppState`]; handlers
//! never reach for a global connection.

pub mod config;
pub mod cors;
mod error;
mod handlers;
pub mod response;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use userbase_storage::UserStore;

pub use config::{Config, Database};
pub use cors::{CorsDecision, CorsPolicy};
pub use error::ApiError;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }
}

/// Build the HTTP API router over the given store and CORS policy.
pub fn build_router(state: AppState, cors: CorsPolicy) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::add_user),
        )
        .route("/users/{id}", get(handlers::users::get_user_by_id));

    Router::new()
        .nest("/v1", api)
        .layer(middleware::from_fn_with_state(
            Arc::new(cors),
            cors::cors_middleware,
        ))
        .with_state(state)
}
