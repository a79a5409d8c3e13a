//! Assignment repository: direct assignment and unassignment.
//!
//! Both keep the owner's workload equal to the hours of their assigned tasks
//! by adjusting it in the same transaction as the assignment row.

use tm_core::entities::{Assignment, User};

use crate::error::DatabaseError;
use crate::helpers::decrement_workload;
use crate::repos::task::fetch_task;
use crate::repos::user::{fetch_user, row_to_user, set_workload};
use crate::service::{TmService, finish};

const SELECT_COLS: &str = "assignment_id, task_id, user_id";

fn row_to_assignment(row: &libsql::Row) -> Result<Assignment, DatabaseError> {
    Ok(Assignment {
        assignment_id: row.get(0)?,
        task_id: row.get(1)?,
        user_id: row.get(2)?,
    })
}

async fn collect_assignments(mut rows: libsql::Rows) -> Result<Vec<Assignment>, DatabaseError> {
    let mut assignments = Vec::new();
    while let Some(row) = rows.next().await? {
        assignments.push(row_to_assignment(&row)?);
    }
    Ok(assignments)
}

/// The user holding `task_id`, if it is assigned.
pub(crate) async fn fetch_task_owner(
    conn: &libsql::Connection,
    task_id: i64,
) -> Result<Option<User>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT u.user_id, u.email, u.first_name, u.last_name, u.role, u.workload \
             FROM assignments a JOIN users u ON u.user_id = a.user_id \
             WHERE a.task_id = ?1",
            [task_id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_user(&row)?)),
        None => Ok(None),
    }
}

/// Insert one assignment row and return it with its id.
pub(crate) async fn insert_assignment(
    conn: &libsql::Connection,
    user_id: i64,
    task_id: i64,
) -> Result<Assignment, DatabaseError> {
    conn.execute(
        "INSERT INTO assignments (task_id, user_id) VALUES (?1, ?2)",
        libsql::params![task_id, user_id],
    )
    .await
    .map_err(|e| match DatabaseError::from(e) {
        DatabaseError::Conflict(_) => {
            DatabaseError::Conflict(format!("task {task_id} is already assigned"))
        }
        // Both rows existed when the caller read them; another writer removed one.
        DatabaseError::LibSql(e) if e.to_string().contains("FOREIGN KEY constraint failed") => {
            DatabaseError::Conflict(format!(
                "task {task_id} or user {user_id} was deleted concurrently"
            ))
        }
        other => other,
    })?;
    Ok(Assignment {
        assignment_id: conn.last_insert_rowid(),
        task_id,
        user_id,
    })
}

async fn create_assignment_tx(
    conn: &libsql::Connection,
    user_id: i64,
    task_id: i64,
) -> Result<Assignment, DatabaseError> {
    let user = fetch_user(conn, user_id).await?;
    let task = fetch_task(conn, task_id).await?;
    if !user.is_eligible_for(&task.needed_role) {
        return Err(DatabaseError::Validation(format!(
            "user {user_id} has role '{}' but task {task_id} needs '{}'",
            user.role, task.needed_role
        )));
    }

    let assignment = insert_assignment(conn, user_id, task_id).await?;
    set_workload(conn, user_id, user.workload + task.estimated_time).await?;
    Ok(assignment)
}

async fn delete_assignment_tx(
    conn: &libsql::Connection,
    assignment_id: i64,
) -> Result<Assignment, DatabaseError> {
    let assignment = fetch_assignment(conn, assignment_id).await?;
    let task = fetch_task(conn, assignment.task_id).await?;
    let user = fetch_user(conn, assignment.user_id).await?;

    conn.execute(
        "DELETE FROM assignments WHERE assignment_id = ?1",
        [assignment_id],
    )
    .await?;
    set_workload(
        conn,
        user.user_id,
        decrement_workload(user.workload, task.estimated_time),
    )
    .await?;
    Ok(assignment)
}

async fn fetch_assignment(
    conn: &libsql::Connection,
    assignment_id: i64,
) -> Result<Assignment, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM assignments WHERE assignment_id = ?1"),
            [assignment_id],
        )
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("assignment", assignment_id))?;
    row_to_assignment(&row)
}

impl TmService {
    /// Assign `task_id` to `user_id` directly and add the task's hours to the
    /// user's workload.
    ///
    /// # Errors
    ///
    /// `NotFound` if either side is missing, `Validation` if the roles differ,
    /// `Conflict` if the task already has an assignment.
    pub async fn create_assignment(
        &self,
        user_id: i64,
        task_id: i64,
    ) -> Result<Assignment, DatabaseError> {
        let _gate = self.write_gate().await;
        let tx = self.db().conn().transaction().await?;
        let result = create_assignment_tx(&tx, user_id, task_id).await;
        let assignment = finish(tx, result).await?;
        tracing::info!(
            assignment_id = assignment.assignment_id,
            task_id,
            user_id,
            "task assigned"
        );
        Ok(assignment)
    }

    pub async fn get_assignment(&self, assignment_id: i64) -> Result<Assignment, DatabaseError> {
        let _gate = self.read_gate().await;
        fetch_assignment(self.db().conn(), assignment_id).await
    }

    pub async fn list_assignments(&self, limit: u32) -> Result<Vec<Assignment>, DatabaseError> {
        let _gate = self.read_gate().await;
        let rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM assignments ORDER BY assignment_id LIMIT ?1"),
                [i64::from(limit)],
            )
            .await?;
        collect_assignments(rows).await
    }

    pub async fn list_assignments_for_user(
        &self,
        user_id: i64,
        limit: u32,
    ) -> Result<Vec<Assignment>, DatabaseError> {
        let _gate = self.read_gate().await;
        let rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM assignments WHERE user_id = ?1 \
                     ORDER BY assignment_id LIMIT ?2"
                ),
                libsql::params![user_id, i64::from(limit)],
            )
            .await?;
        collect_assignments(rows).await
    }

    /// Unassign: remove the assignment and take the task's hours off its owner.
    pub async fn delete_assignment(&self, assignment_id: i64) -> Result<(), DatabaseError> {
        let _gate = self.write_gate().await;
        let tx = self.db().conn().transaction().await?;
        let result = delete_assignment_tx(&tx, assignment_id).await;
        let assignment = finish(tx, result).await?;
        tracing::info!(
            assignment_id,
            task_id = assignment.task_id,
            user_id = assignment.user_id,
            "task unassigned"
        );
        Ok(())
    }
}
