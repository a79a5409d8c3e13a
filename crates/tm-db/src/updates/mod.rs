//! Partial-update types for repository `update_*` methods.

pub mod task;
