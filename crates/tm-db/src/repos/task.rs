//! Task repository: CRUD plus the unassigned-task query the scheduler reads.

use chrono::{NaiveDate, Utc};

use tm_core::entities::Task;
use tm_core::inputs::NewTask;
use tm_core::validation::{
    normalize_role, validate_deadline, validate_description, validate_estimated_time,
    validate_priority,
};

use crate::error::DatabaseError;
use crate::helpers::{decrement_workload, format_date, get_u8, parse_date};
use crate::repos::assignment::fetch_task_owner;
use crate::repos::user::set_workload;
use crate::service::{TmService, finish};
use crate::updates::task::TaskUpdate;

const SELECT_COLS: &str = "task_id, description, deadline, priority, estimated_time, needed_role";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        task_id: row.get(0)?,
        description: row.get(1)?,
        deadline: parse_date(&row.get::<String>(2)?)?,
        priority: get_u8(row, 3)?,
        estimated_time: row.get(4)?,
        needed_role: row.get(5)?,
    })
}

async fn collect_tasks(mut rows: libsql::Rows) -> Result<Vec<Task>, DatabaseError> {
    let mut tasks = Vec::new();
    while let Some(row) = rows.next().await? {
        tasks.push(row_to_task(&row)?);
    }
    Ok(tasks)
}

pub(crate) async fn fetch_task(
    conn: &libsql::Connection,
    task_id: i64,
) -> Result<Task, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM tasks WHERE task_id = ?1"),
            [task_id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("task", task_id))?;
    row_to_task(&row)
}

/// Tasks with no assignment row, ascending `task_id`.
pub(crate) async fn fetch_unassigned_tasks(
    conn: &libsql::Connection,
) -> Result<Vec<Task>, DatabaseError> {
    let rows = conn
        .query(
            &format!(
                "SELECT {SELECT_COLS} FROM tasks t \
                 WHERE NOT EXISTS (SELECT 1 FROM assignments a WHERE a.task_id = t.task_id) \
                 ORDER BY t.task_id"
            ),
            (),
        )
        .await?;
    collect_tasks(rows).await
}

/// Apply `update` to a copy of `current`, validating each supplied field.
fn apply_update(current: &Task, update: TaskUpdate, today: NaiveDate) -> Result<Task, DatabaseError> {
    let mut task = current.clone();
    if let Some(description) = update.description {
        validate_description(&description)?;
        task.description = description;
    }
    if let Some(deadline) = update.deadline {
        validate_deadline(deadline, today)?;
        task.deadline = deadline;
    }
    if let Some(priority) = update.priority {
        validate_priority(priority)?;
        task.priority = priority;
    }
    if let Some(hours) = update.estimated_time {
        validate_estimated_time(hours)?;
        task.estimated_time = hours;
    }
    if let Some(role) = update.needed_role {
        task.needed_role = normalize_role(&role)?;
    }
    Ok(task)
}

async fn update_task_tx(
    conn: &libsql::Connection,
    task_id: i64,
    update: TaskUpdate,
    today: NaiveDate,
) -> Result<Task, DatabaseError> {
    let current = fetch_task(conn, task_id).await?;
    let updated = apply_update(&current, update, today)?;
    if updated == current {
        return Ok(current);
    }

    if let Some(owner) = fetch_task_owner(conn, task_id).await? {
        if !owner.is_eligible_for(&updated.needed_role) {
            return Err(DatabaseError::InvalidState(format!(
                "task {task_id} is assigned to user {} with role '{}'; unassign it before \
                 changing needed_role to '{}'",
                owner.user_id, owner.role, updated.needed_role
            )));
        }
        let delta = updated.estimated_time - current.estimated_time;
        if delta != 0.0 {
            set_workload(conn, owner.user_id, (owner.workload + delta).max(0.0)).await?;
        }
    }

    conn.execute(
        "UPDATE tasks SET description = ?1, deadline = ?2, priority = ?3, \
         estimated_time = ?4, needed_role = ?5 WHERE task_id = ?6",
        libsql::params![
            updated.description.as_str(),
            format_date(updated.deadline),
            i64::from(updated.priority),
            updated.estimated_time,
            updated.needed_role.as_str(),
            task_id
        ],
    )
    .await?;
    Ok(updated)
}

async fn delete_task_tx(conn: &libsql::Connection, task_id: i64) -> Result<(), DatabaseError> {
    let task = fetch_task(conn, task_id).await?;
    let owner = fetch_task_owner(conn, task_id).await?;

    // The assignment row goes with the task (ON DELETE CASCADE).
    conn.execute("DELETE FROM tasks WHERE task_id = ?1", [task_id])
        .await?;

    if let Some(owner) = owner {
        set_workload(
            conn,
            owner.user_id,
            decrement_workload(owner.workload, task.estimated_time),
        )
        .await?;
    }
    Ok(())
}

impl TmService {
    /// Create a task, filling in defaults for omitted fields.
    ///
    /// # Errors
    ///
    /// `Validation` if any field is out of range.
    pub async fn create_task(&self, new_task: NewTask) -> Result<Task, DatabaseError> {
        let fields = new_task.validate(Utc::now().date_naive())?;

        let _gate = self.write_gate().await;
        let conn = self.db().conn();
        conn.execute(
            "INSERT INTO tasks (description, deadline, priority, estimated_time, needed_role)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                fields.description.as_str(),
                format_date(fields.deadline),
                i64::from(fields.priority),
                fields.estimated_time,
                fields.needed_role.as_str()
            ],
        )
        .await?;

        let task = Task {
            task_id: conn.last_insert_rowid(),
            description: fields.description,
            deadline: fields.deadline,
            priority: fields.priority,
            estimated_time: fields.estimated_time,
            needed_role: fields.needed_role,
        };
        tracing::debug!(task_id = task.task_id, needed_role = %task.needed_role, "task created");
        Ok(task)
    }

    pub async fn get_task(&self, task_id: i64) -> Result<Task, DatabaseError> {
        let _gate = self.read_gate().await;
        fetch_task(self.db().conn(), task_id).await
    }

    /// Tasks in ascending id order.
    pub async fn list_tasks(&self, limit: u32) -> Result<Vec<Task>, DatabaseError> {
        let _gate = self.read_gate().await;
        let rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tasks ORDER BY task_id LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;
        collect_tasks(rows).await
    }

    pub async fn list_unassigned_tasks(&self) -> Result<Vec<Task>, DatabaseError> {
        let _gate = self.read_gate().await;
        fetch_unassigned_tasks(self.db().conn()).await
    }

    /// Apply a partial update. Supplied fields are validated as on create.
    ///
    /// If the task is assigned, a change of `estimated_time` moves the
    /// owner's workload by the difference in the same transaction.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Validation`, or `InvalidState` when the new
    /// `needed_role` no longer matches the assigned user's role.
    pub async fn update_task(
        &self,
        task_id: i64,
        update: TaskUpdate,
    ) -> Result<Task, DatabaseError> {
        let today = Utc::now().date_naive();
        let _gate = self.write_gate().await;
        let tx = self.db().conn().transaction().await?;
        let result = update_task_tx(&tx, task_id, update, today).await;
        finish(tx, result).await
    }

    /// Delete a task. If it was assigned, the owner's workload drops by the
    /// task's `estimated_time`.
    pub async fn delete_task(&self, task_id: i64) -> Result<(), DatabaseError> {
        let _gate = self.write_gate().await;
        let tx = self.db().conn().transaction().await?;
        let result = delete_task_tx(&tx, task_id).await;
        finish(tx, result).await?;
        tracing::info!(task_id, "task deleted");
        Ok(())
    }
}
