//! # tm-scheduler
//!
//! Assigns unassigned tasks to the least-loaded user whose role matches.
//!
//! The algorithm itself lives in [`plan`] and is pure. [`schedule()`] wraps
//! it in one unit of work against any [`ScheduleStore`]: read the unassigned
//! tasks and users, plan, stage the new assignments and workloads, commit.
//! A failed commit leaves the store untouched.
//!
//! [`memory::MemoryStore`] is an in-process store used by tests and by
//! anything that wants the scheduler without a database.

pub mod error;
pub mod memory;
pub mod plan;
pub mod schedule;
pub mod store;

pub use error::StoreError;
pub use plan::{Plan, PlannedAssignment, plan};
pub use schedule::{ScheduleReport, schedule};
pub use store::{ScheduleBatch, ScheduleStore};
