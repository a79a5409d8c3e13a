use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tm_core::entities::Assignment;

use crate::error::StoreError;
use crate::plan::plan;
use crate::store::{ScheduleBatch, ScheduleStore};

/// Outcome of one `schedule()` call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScheduleReport {
    /// Assignments created by this run, in task order.
    pub assignments: Vec<Assignment>,
    /// Unassigned tasks no user's role matched.
    pub skipped_task_ids: Vec<i64>,
}

impl ScheduleReport {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Assign every unassigned task to the least-loaded user with a matching role.
///
/// Runs as one batch on `store`: nothing is written unless at least one task
/// found a user, and then everything is written in a single commit.
///
/// # Errors
///
/// Only persistence failures. `StoreError::Conflict` when the commit is
/// rejected for a uniqueness violation (a task was assigned elsewhere);
/// `StoreError::Fatal` for anything else. Either way no part of the batch is
/// persisted.
pub async fn schedule<S: ScheduleStore>(store: &S) -> Result<ScheduleReport, StoreError> {
    let mut batch = store.begin().await?;

    let tasks = batch.list_unassigned_tasks().await?;
    if tasks.is_empty() {
        tracing::debug!("schedule: no unassigned tasks");
        return Ok(ScheduleReport::default());
    }

    let users = batch.list_users().await?;
    let plan = plan(&tasks, &users);
    if plan.is_empty() {
        tracing::debug!(
            unassigned = tasks.len(),
            users = users.len(),
            "schedule: no eligible users"
        );
        return Ok(ScheduleReport {
            assignments: Vec::new(),
            skipped_task_ids: plan.skipped,
        });
    }

    for planned in &plan.assignments {
        tracing::debug!(
            task_id = planned.task_id,
            user_id = planned.user_id,
            estimated_time = planned.estimated_time,
            "schedule: staging assignment"
        );
        batch.create_assignment(planned.user_id, planned.task_id)?;
    }
    for &(user_id, workload) in &plan.workloads {
        batch.update_user_workload(user_id, workload)?;
    }

    let assignments = batch.commit().await.inspect_err(|error| {
        if error.is_conflict() {
            tracing::warn!(%error, "schedule: batch rejected");
        }
    })?;

    tracing::info!(
        assigned = assignments.len(),
        skipped = plan.skipped.len(),
        users_updated = plan.workloads.len(),
        "schedule: batch committed"
    );

    Ok(ScheduleReport {
        assignments,
        skipped_task_ids: plan.skipped,
    })
}
