//! Greedy least-load planning.
//!
//! Tasks are taken in the order given. Each goes to the eligible user with
//! the strictly smallest running workload; among equal workloads the user
//! seen first wins. The chosen user's running workload grows by the task's
//! `estimated_time` before the next task is considered.

use std::collections::HashMap;

use tm_core::entities::{Task, User};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedAssignment {
    pub task_id: i64,
    pub user_id: i64,
    pub estimated_time: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    /// In task order.
    pub assignments: Vec<PlannedAssignment>,
    /// Final workload of every user that received work, in user order.
    pub workloads: Vec<(i64, f64)>,
    /// Tasks no user could take.
    pub skipped: Vec<i64>,
}

impl Plan {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

/// Plan one batch. `O(tasks x users)` in the worst case; the role index
/// limits each task to the users that could take it.
#[must_use]
pub fn plan(tasks: &[Task], users: &[User]) -> Plan {
    let mut workloads: Vec<f64> = users.iter().map(|u| u.workload).collect();
    let mut touched = vec![false; users.len()];

    let mut by_role: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, user) in users.iter().enumerate() {
        by_role.entry(user.role.as_str()).or_default().push(idx);
    }

    let mut plan = Plan::default();
    for task in tasks {
        let best = by_role
            .get(task.needed_role.as_str())
            .and_then(|candidates| least_loaded(candidates, &workloads));

        let Some(idx) = best else {
            plan.skipped.push(task.task_id);
            continue;
        };

        workloads[idx] += task.estimated_time;
        touched[idx] = true;
        plan.assignments.push(PlannedAssignment {
            task_id: task.task_id,
            user_id: users[idx].user_id,
            estimated_time: task.estimated_time,
        });
    }

    plan.workloads = users
        .iter()
        .zip(workloads)
        .zip(touched)
        .filter(|(_, touched)| *touched)
        .map(|((user, workload), _)| (user.user_id, workload))
        .collect();
    plan
}

fn least_loaded(candidates: &[usize], workloads: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for &idx in candidates {
        if best.is_none_or(|b| workloads[idx] < workloads[b]) {
            best = Some(idx);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn user(user_id: i64, role: &str, workload: f64) -> User {
        User {
            user_id,
            email: format!("u{user_id}@example.com"),
            first_name: "U".into(),
            last_name: format!("{user_id}"),
            role: role.into(),
            workload,
        }
    }

    fn task(task_id: i64, role: &str, estimated_time: f64) -> Task {
        Task {
            task_id,
            description: format!("task {task_id}"),
            deadline: NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
            priority: 3,
            estimated_time,
            needed_role: role.into(),
        }
    }

    #[test]
    fn picks_least_loaded_eligible_user() {
        let users = [user(1, "dev", 5.0), user(2, "dev", 2.0), user(3, "qa", 0.0)];
        let plan = plan(&[task(10, "dev", 1.0)], &users);

        assert_eq!(
            plan.assignments,
            vec![PlannedAssignment {
                task_id: 10,
                user_id: 2,
                estimated_time: 1.0
            }]
        );
        assert_eq!(plan.workloads, vec![(2, 3.0)]);
        assert!(plan.skipped.is_empty());
    }

    #[test]
    fn equal_workloads_go_to_first_seen_user() {
        let users = [user(4, "dev", 1.0), user(2, "dev", 1.0)];
        let plan = plan(&[task(1, "dev", 1.0)], &users);
        assert_eq!(plan.assignments[0].user_id, 4);
    }

    #[test]
    fn running_workload_spreads_a_batch() {
        let users = [user(1, "dev", 0.0), user(2, "dev", 0.0)];
        let tasks = [
            task(1, "dev", 3.0),
            task(2, "dev", 1.0),
            task(3, "dev", 1.0),
            task(4, "dev", 2.0),
        ];
        let plan = plan(&tasks, &users);

        let owners: Vec<i64> = plan.assignments.iter().map(|a| a.user_id).collect();
        // 1 -> u1 (3), 2 -> u2 (1), 3 -> u2 (2), 4 -> u2 (4)
        assert_eq!(owners, vec![1, 2, 2, 2]);
        assert_eq!(plan.workloads, vec![(1, 3.0), (2, 4.0)]);
    }

    #[test]
    fn role_match_is_exact() {
        let users = [user(1, "senior", 0.0)];
        let plan = plan(&[task(1, "Senior", 1.0), task(2, "senior ", 1.0)], &users);
        assert!(plan.is_empty());
        assert_eq!(plan.skipped, vec![1, 2]);
        assert!(plan.workloads.is_empty());
    }

    #[test]
    fn no_users_skips_everything() {
        let plan = plan(&[task(1, "dev", 1.0)], &[]);
        assert!(plan.is_empty());
        assert_eq!(plan.skipped, vec![1]);
    }
}
