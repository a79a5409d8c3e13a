//! libSQL implementation of the scheduler's store contract.
//!
//! `begin()` takes the service's exclusive gate and keeps it in the batch.
//! Reads go straight to the connection; staged writes stay in memory until
//! `commit()`, which replays them inside one immediate transaction and rolls
//! back on the first failure.
//!
//! The gate only serializes this process. Another connection to the same
//! file can still write between the batch's reads and its commit, so each
//! staged workload is written only if the stored value still equals the one
//! the batch read. A changed or deleted user fails the commit with
//! `Conflict`.

use std::collections::{HashMap, HashSet};

use tm_core::entities::{Assignment, Task, User};
use tm_scheduler::{ScheduleBatch, ScheduleStore, StoreError};
use libsql::TransactionBehavior;
use tokio::sync::OwnedRwLockWriteGuard;

use crate::error::DatabaseError;
use crate::repos::assignment::insert_assignment;
use crate::repos::task::fetch_unassigned_tasks;
use crate::repos::user::{fetch_users, set_workload};
use crate::service::{TmService, finish};

pub struct LibsqlBatch {
    conn: libsql::Connection,
    _gate: OwnedRwLockWriteGuard<()>,
    assignments: Vec<(i64, i64)>,
    staged_tasks: HashSet<i64>,
    workloads: Vec<(i64, f64)>,
    /// Workload of each user as `list_users` saw it.
    read_workloads: HashMap<i64, f64>,
}

impl ScheduleStore for TmService {
    type Batch = LibsqlBatch;

    async fn begin(&self) -> Result<LibsqlBatch, StoreError> {
        let gate = self.owned_write_gate().await;
        Ok(LibsqlBatch {
            conn: self.db().conn().clone(),
            _gate: gate,
            assignments: Vec::new(),
            staged_tasks: HashSet::new(),
            workloads: Vec::new(),
            read_workloads: HashMap::new(),
        })
    }
}

/// Set `workload` only if the row still holds `expected`.
async fn swap_workload(
    conn: &libsql::Connection,
    user_id: i64,
    expected: f64,
    workload: f64,
) -> Result<(), DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE users SET workload = ?1 WHERE user_id = ?2 AND workload = ?3",
            libsql::params![workload, user_id, expected],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::Conflict(format!(
            "user {user_id} changed since the batch read it"
        )));
    }
    Ok(())
}

async fn write_batch(
    conn: &libsql::Connection,
    batch: &LibsqlBatch,
) -> Result<Vec<Assignment>, DatabaseError> {
    let mut created = Vec::with_capacity(batch.assignments.len());
    for &(user_id, task_id) in &batch.assignments {
        created.push(insert_assignment(conn, user_id, task_id).await?);
    }
    for &(user_id, workload) in &batch.workloads {
        match batch.read_workloads.get(&user_id) {
            Some(&expected) => swap_workload(conn, user_id, expected, workload).await?,
            None => set_workload(conn, user_id, workload).await?,
        }
    }
    Ok(created)
}

impl ScheduleBatch for LibsqlBatch {
    async fn list_unassigned_tasks(&mut self) -> Result<Vec<Task>, StoreError> {
        Ok(fetch_unassigned_tasks(&self.conn).await?)
    }

    async fn list_users(&mut self) -> Result<Vec<User>, StoreError> {
        let users = fetch_users(&self.conn).await?;
        self.read_workloads = users.iter().map(|u| (u.user_id, u.workload)).collect();
        Ok(users)
    }

    fn create_assignment(&mut self, user_id: i64, task_id: i64) -> Result<(), StoreError> {
        if !self.staged_tasks.insert(task_id) {
            return Err(StoreError::conflict(format!(
                "task {task_id} staged twice in one batch"
            )));
        }
        self.assignments.push((user_id, task_id));
        Ok(())
    }

    fn update_user_workload(&mut self, user_id: i64, workload: f64) -> Result<(), StoreError> {
        if !workload.is_finite() || workload < 0.0 {
            return Err(StoreError::Fatal(anyhow::anyhow!(
                "invalid workload {workload} for user {user_id}"
            )));
        }
        self.workloads.push((user_id, workload));
        Ok(())
    }

    async fn commit(self) -> Result<Vec<Assignment>, StoreError> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await
            .map_err(DatabaseError::from)?;
        let result = write_batch(&tx, &self).await;
        Ok(finish(tx, result).await?)
    }
}
