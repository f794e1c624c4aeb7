//! User endpoints
//!
//! Decode request parameters, validate, call the store, encode the result.
//! Column names from the client are passed through untouched; the store's
//! allow-list decides whether they are usable.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::User;
use crate::http::error::ApiError;
use crate::http::extractors::{ApiJson, ApiQuery, UserId};
use crate::models::NewUser;
use crate::state::AppState;

/// Create user request
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Create user response
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUserResponse {
    pub id: Uuid,
}

/// Column/value lookup, from a query string or a JSON body
#[derive(Debug, Deserialize)]
pub struct LookupRequest {
    pub column: String,
    pub value: String,
}

/// List of users
#[derive(Debug, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

/// POST /users - create a user, or return the id already holding the email
async fn create_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreateUserResponse>), ApiError> {
    let user = NewUser::new(&req.first_name, &req.last_name, &req.email)?;
    let id = state
        .users()
        .insert(user.first_name(), user.last_name(), user.email())
        .await?;

    Ok((StatusCode::CREATED, Json(CreateUserResponse { id })))
}

/// GET /users?column=..&value=..
async fn list_users(
    State(state): State<AppState>,
    ApiQuery(req): ApiQuery<LookupRequest>,
) -> Result<Json<UsersResponse>, ApiError> {
    lookup(&state, req).await
}

/// POST /users/search - same lookup with a JSON body
async fn search_users(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LookupRequest>,
) -> Result<Json<UsersResponse>, ApiError> {
    lookup(&state, req).await
}

async fn lookup(state: &AppState, req: LookupRequest) -> Result<Json<UsersResponse>, ApiError> {
    let users = state.users().find_by_column(&req.column, &req.value).await?;
    tracing::debug!(column = %req.column, count = users.len(), "user lookup");
    Ok(Json(UsersResponse { users }))
}

/// GET /users/{id}
async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<Json<User>, ApiError> {
    let user = state.users().get_by_id(id).await?;
    Ok(Json(user))
}

/// GET /users/by-email/{email}
async fn get_user_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Json<User>, ApiError> {
    let user = state.users().get_by_email(&email).await?;
    Ok(Json(user))
}

/// DELETE /users/{id}
async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> Result<StatusCode, ApiError> {
    state.users().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/search", post(search_users))
        .route("/users/by-email/{email}", get(get_user_by_email))
        .route("/users/{id}", get(get_user).delete(delete_user))
}
