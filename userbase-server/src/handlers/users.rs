//! User record endpoints.
//!
//! Store calls are blocking, so each one runs on the blocking pool.

use crate::error::ApiError;
use crate::response::{PaginatedResponse, SuccessResponse};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::debug;
use userbase_query::{next_page, PageRequest};
use userbase_types::{validate_email, User, UserId};

#[derive(Debug, Deserialize)]
pub struct CreateUserBody {
    pub email: String,
}

/// Raw query parameters of the listing endpoint. Everything stays a string
/// so that malformed values are resolved by the engine instead of rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersParams {
    pub cursor: Option<String>,
    pub page_size: Option<String>,
    pub search_str: Option<String>,
}

pub async fn add_user(
    State(state): State<AppState>,
    body: Result<Json<CreateUserBody>, JsonRejection>,
) -> Result<Json<SuccessResponse<User>>, ApiError> {
    let Json(body) = body.map_err(|rejection| {
        debug!("Rejected create-user body: {}", rejection);
        ApiError::BadRequest("Invalid request body")
    })?;

    if validate_email(&body.email).is_err() {
        return Err(ApiError::BadRequest("Invalid email address"));
    }

    let store = state.store.clone();
    let user = tokio::task::spawn_blocking(move || store.insert(&body.email)).await??;
    debug!("Created user {}", user.id);
    Ok(Json(SuccessResponse::with_data(user)))
}

pub async fn get_user_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse<User>>, ApiError> {
    let id = UserId::parse_v4(&id).map_err(|_| ApiError::BadRequest("Malformed user UUID"))?;

    let store = state.store.clone();
    let user = tokio::task::spawn_blocking(move || store.get(&id)).await??;
    Ok(Json(match user {
        Some(user) => SuccessResponse::with_data(user),
        None => SuccessResponse::empty(),
    }))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<PaginatedResponse<Vec<User>>>, ApiError> {
    let request = PageRequest::from_params(
        params.cursor.as_deref(),
        params.page_size.as_deref(),
        params.search_str.as_deref(),
    );

    let store = state.store.clone();
    let page = tokio::task::spawn_blocking(move || next_page(store.as_ref(), &request)).await??;

    Ok(Json(PaginatedResponse {
        status: crate::response::Status::Success,
        data: page.records,
        cursor: page.cursor.map(|c| c.into_string()),
        page_size: page.page_size,
    }))
}
