//! Sign-up, login/logout, and user administration.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tm_auth::{AuthError, issue_token, verify_password};
use tm_core::entities::User;
use tm_core::inputs::NewUser;

use super::ListParams;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SignupResponse {
    pub user_id: i64,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(new_user): Json<NewUser>,
) -> Result<(StatusCode, Json<SignupResponse>), ApiError> {
    let user = state.svc.create_user(new_user).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: user.user_id,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let creds = state
        .svc
        .find_user_by_email(&request.email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;
    verify_password(&request.password, &creds.password_hash)?;

    let issued = issue_token(state.token_ttl)?;
    state.svc.store_token(creds.user.user_id, &issued).await?;
    tracing::info!(user_id = creds.user.user_id, "login");

    Ok(Json(TokenResponse {
        access_token: issued.token,
        token_type: "bearer".into(),
        expires_at: issued.expires_at,
    }))
}

pub async fn logout(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<StatusCode, ApiError> {
    state.svc.revoke_token(&current.token_hash).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn me(current: CurrentUser) -> Json<User> {
    Json(current.user)
}

pub async fn list_users(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, ApiError> {
    let users = state
        .svc
        .list_users(params.limit_or(state.default_limit))
        .await?;
    Ok(Json(users))
}

pub async fn delete_user(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(user_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.svc.delete_user(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
