//! Direct assignment and unassignment.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tm_core::entities::Assignment;

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewAssignment {
    pub user_id: i64,
    pub task_id: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct AssignmentParams {
    pub limit: Option<u32>,
    pub user_id: Option<i64>,
}

pub async fn create(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(body): Json<NewAssignment>,
) -> Result<(StatusCode, Json<Assignment>), ApiError> {
    let assignment = state
        .svc
        .create_assignment(body.user_id, body.task_id)
        .await?;
    Ok((StatusCode::CREATED, Json(assignment)))
}

pub async fn list(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(params): Query<AssignmentParams>,
) -> Result<Json<Vec<Assignment>>, ApiError> {
    let limit = params.limit.unwrap_or(state.default_limit);
    let assignments = match params.user_id {
        Some(user_id) => state.svc.list_assignments_for_user(user_id, limit).await?,
        None => state.svc.list_assignments(limit).await?,
    };
    Ok(Json(assignments))
}

pub async fn get(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(assignment_id): Path<i64>,
) -> Result<Json<Assignment>, ApiError> {
    Ok(Json(state.svc.get_assignment(assignment_id).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(assignment_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.svc.delete_assignment(assignment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
