//! In-process [`ScheduleStore`] backed by ordered maps.
//!
//! The whole state sits behind one `tokio::sync::Mutex`; a batch owns the
//! guard until it commits or is dropped. Commit validates every staged
//! change before applying any of them.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use anyhow::anyhow;
use chrono::{Days, Utc};
use tm_core::entities::{Assignment, Task, User};
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::error::StoreError;
use crate::store::{ScheduleBatch, ScheduleStore};

/// Failure to inject into the next commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    Conflict,
    Fatal,
}

/// Everything the store holds, for before/after comparisons.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
    pub assignments: Vec<Assignment>,
}

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, User>,
    tasks: BTreeMap<i64, Task>,
    assignments: BTreeMap<i64, Assignment>,
    next_id: i64,
    fault: Option<Fault>,
}

impl State {
    const fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn assignment_for_task(&self, task_id: i64) -> Option<&Assignment> {
        self.assignments.values().find(|a| a.task_id == task_id)
    }

    fn add_workload(&mut self, user_id: i64, delta: f64) {
        if let Some(user) = self.users.get_mut(&user_id) {
            user.workload = (user.workload + delta).max(0.0);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user with the given role and starting workload; returns its id.
    pub async fn insert_user(&self, role: &str, workload: f64) -> i64 {
        let mut state = self.state.lock().await;
        let user_id = state.next_id();
        state.users.insert(
            user_id,
            User {
                user_id,
                email: format!("user{user_id}@example.com"),
                first_name: "User".into(),
                last_name: user_id.to_string(),
                role: role.into(),
                workload,
            },
        );
        user_id
    }

    /// Add an unassigned task; returns its id.
    pub async fn insert_task(&self, needed_role: &str, estimated_time: f64) -> i64 {
        let mut state = self.state.lock().await;
        let task_id = state.next_id();
        let deadline = Utc::now()
            .date_naive()
            .checked_add_days(Days::new(1))
            .unwrap_or_else(|| Utc::now().date_naive());
        state.tasks.insert(
            task_id,
            Task {
                task_id,
                description: format!("task {task_id}"),
                deadline,
                priority: 3,
                estimated_time,
                needed_role: needed_role.into(),
            },
        );
        task_id
    }

    /// Direct assignment outside any batch, keeping the owner's workload in step.
    ///
    /// # Errors
    ///
    /// `Conflict` if the task is already assigned; `Fatal` if either entity is
    /// missing or the roles differ.
    pub async fn assign(&self, user_id: i64, task_id: i64) -> Result<Assignment, StoreError> {
        let mut state = self.state.lock().await;
        let task = state
            .tasks
            .get(&task_id)
            .cloned()
            .ok_or_else(|| anyhow!("task {task_id} not found"))?;
        let user = state
            .users
            .get(&user_id)
            .ok_or_else(|| anyhow!("user {user_id} not found"))?;
        if !user.is_eligible_for(&task.needed_role) {
            return Err(anyhow!(
                "user {user_id} has role '{}', task {task_id} needs '{}'",
                user.role,
                task.needed_role
            )
            .into());
        }
        if state.assignment_for_task(task_id).is_some() {
            return Err(StoreError::conflict(format!(
                "task {task_id} is already assigned"
            )));
        }

        let assignment = Assignment {
            assignment_id: state.next_id(),
            task_id,
            user_id,
        };
        state.assignments.insert(assignment.assignment_id, assignment);
        state.add_workload(user_id, task.estimated_time);
        Ok(assignment)
    }

    /// Remove an assignment and take its task's time off the owner.
    pub async fn unassign(&self, assignment_id: i64) -> bool {
        let mut state = self.state.lock().await;
        let Some(assignment) = state.assignments.remove(&assignment_id) else {
            return false;
        };
        let hours = state
            .tasks
            .get(&assignment.task_id)
            .map_or(0.0, |t| t.estimated_time);
        state.add_workload(assignment.user_id, -hours);
        true
    }

    /// Delete a task together with its assignment, if any.
    pub async fn delete_task(&self, task_id: i64) -> bool {
        let mut state = self.state.lock().await;
        let Some(task) = state.tasks.remove(&task_id) else {
            return false;
        };
        if let Some(assignment) = state.assignment_for_task(task_id).copied() {
            state.assignments.remove(&assignment.assignment_id);
            state.add_workload(assignment.user_id, -task.estimated_time);
        }
        true
    }

    /// Make the next commit fail with the given fault, after validation.
    pub async fn fail_next_commit(&self, fault: Fault) {
        self.state.lock().await.fault = Some(fault);
    }

    pub async fn snapshot(&self) -> Snapshot {
        let state = self.state.lock().await;
        Snapshot {
            users: state.users.values().cloned().collect(),
            tasks: state.tasks.values().cloned().collect(),
            assignments: state.assignments.values().copied().collect(),
        }
    }
}

impl ScheduleStore for MemoryStore {
    type Batch = MemoryBatch;

    async fn begin(&self) -> Result<MemoryBatch, StoreError> {
        Ok(MemoryBatch {
            state: Arc::clone(&self.state).lock_owned().await,
            staged: Vec::new(),
            staged_tasks: HashSet::new(),
            workloads: Vec::new(),
        })
    }
}

pub struct MemoryBatch {
    state: OwnedMutexGuard<State>,
    staged: Vec<(i64, i64)>,
    staged_tasks: HashSet<i64>,
    workloads: Vec<(i64, f64)>,
}

impl MemoryBatch {
    fn validate(&self) -> Result<(), StoreError> {
        for &(user_id, task_id) in &self.staged {
            if !self.state.tasks.contains_key(&task_id) {
                return Err(anyhow!("task {task_id} not found").into());
            }
            if !self.state.users.contains_key(&user_id) {
                return Err(anyhow!("user {user_id} not found").into());
            }
            if self.state.assignment_for_task(task_id).is_some() {
                return Err(StoreError::conflict(format!(
                    "task {task_id} is already assigned"
                )));
            }
        }
        for &(user_id, _) in &self.workloads {
            if !self.state.users.contains_key(&user_id) {
                return Err(anyhow!("user {user_id} not found").into());
            }
        }
        Ok(())
    }
}

impl ScheduleBatch for MemoryBatch {
    async fn list_unassigned_tasks(&mut self) -> Result<Vec<Task>, StoreError> {
        let assigned: HashSet<i64> = self.state.assignments.values().map(|a| a.task_id).collect();
        Ok(self
            .state
            .tasks
            .values()
            .filter(|t| !assigned.contains(&t.task_id))
            .cloned()
            .collect())
    }

    async fn list_users(&mut self) -> Result<Vec<User>, StoreError> {
        Ok(self.state.users.values().cloned().collect())
    }

    fn create_assignment(&mut self, user_id: i64, task_id: i64) -> Result<(), StoreError> {
        if !self.staged_tasks.insert(task_id) {
            return Err(StoreError::conflict(format!(
                "task {task_id} staged twice in one batch"
            )));
        }
        self.staged.push((user_id, task_id));
        Ok(())
    }

    fn update_user_workload(&mut self, user_id: i64, workload: f64) -> Result<(), StoreError> {
        if !workload.is_finite() || workload < 0.0 {
            return Err(anyhow!("invalid workload {workload} for user {user_id}").into());
        }
        self.workloads.push((user_id, workload));
        Ok(())
    }

    async fn commit(mut self) -> Result<Vec<Assignment>, StoreError> {
        self.validate()?;
        match self.state.fault.take() {
            Some(Fault::Conflict) => {
                return Err(StoreError::conflict("injected commit conflict"));
            }
            Some(Fault::Fatal) => return Err(anyhow!("injected commit failure").into()),
            None => {}
        }

        let mut created = Vec::with_capacity(self.staged.len());
        for &(user_id, task_id) in &self.staged {
            let assignment = Assignment {
                assignment_id: self.state.next_id(),
                task_id,
                user_id,
            };
            self.state.assignments.insert(assignment.assignment_id, assignment);
            created.push(assignment);
        }
        for &(user_id, workload) in &self.workloads {
            if let Some(user) = self.state.users.get_mut(&user_id) {
                user.workload = workload;
            }
        }
        Ok(created)
    }
}
