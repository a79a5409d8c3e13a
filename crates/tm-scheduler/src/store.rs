//! The narrow store contract the scheduler runs against.
//!
//! A store hands out one [`ScheduleBatch`] at a time. The batch reads the
//! current state, stages changes in memory, and writes them in a single
//! atomic commit. Dropping a batch without committing discards everything it
//! staged. Implementations hold an exclusive gate for the lifetime of the
//! batch, which serializes scheduler runs against each other and against
//! direct assignments on the same store.

use std::future::Future;

use tm_core::entities::{Assignment, Task, User};

use crate::error::StoreError;

pub trait ScheduleStore: Send + Sync {
    type Batch: ScheduleBatch;

    /// Open a unit of work. Waits for any other batch or writer to finish.
    fn begin(&self) -> impl Future<Output = Result<Self::Batch, StoreError>> + Send;
}

pub trait ScheduleBatch: Send {
    /// Tasks with no assignment row, ascending `task_id`.
    fn list_unassigned_tasks(
        &mut self,
    ) -> impl Future<Output = Result<Vec<Task>, StoreError>> + Send;

    /// All users, ascending `user_id`.
    fn list_users(&mut self) -> impl Future<Output = Result<Vec<User>, StoreError>> + Send;

    /// Stage a new assignment.
    ///
    /// # Errors
    ///
    /// `StoreError::Conflict` if this batch already staged `task_id`. A task
    /// that was assigned outside the batch is rejected at [`commit`](Self::commit).
    fn create_assignment(&mut self, user_id: i64, task_id: i64) -> Result<(), StoreError>;

    /// Stage a user's new absolute workload.
    ///
    /// # Errors
    ///
    /// Implementations may reject non-finite or negative values.
    fn update_user_workload(&mut self, user_id: i64, workload: f64) -> Result<(), StoreError>;

    /// Persist every staged change atomically and return the created
    /// assignments with their store-assigned ids.
    fn commit(self) -> impl Future<Output = Result<Vec<Assignment>, StoreError>> + Send;
}
