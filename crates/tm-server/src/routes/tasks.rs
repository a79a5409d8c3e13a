//! Task CRUD.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tm_core::entities::Task;
use tm_core::inputs::NewTask;
use tm_db::updates::task::TaskUpdate;

use super::ListParams;
use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    _current: CurrentUser,
    Json(new_task): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let task = state.svc.create_task(new_task).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list(
    State(state): State<AppState>,
    _current: CurrentUser,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .svc
        .list_tasks(params.limit_or(state.default_limit))
        .await?;
    Ok(Json(tasks))
}

pub async fn get(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(state.svc.get_task(task_id).await?))
}

/// Partial update. Unknown fields are a 400; values that fail validation a 422.
pub async fn update(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(task_id): Path<i64>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Task>, ApiError> {
    let update: TaskUpdate = serde_json::from_value(body)
        .map_err(|e| ApiError::bad_request(format!("invalid task update: {e}")))?;
    Ok(Json(state.svc.update_task(task_id, update).await?))
}

pub async fn delete(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(task_id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.svc.delete_task(task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
