use axum::Json;
use axum::extract::State;
use tm_scheduler::{ScheduleReport, schedule};

use crate::error::ApiError;
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Run one scheduler batch now.
pub async fn run(
    State(state): State<AppState>,
    _current: CurrentUser,
) -> Result<Json<ScheduleReport>, ApiError> {
    let report = schedule(state.svc.as_ref()).await?;
    Ok(Json(report))
}
