use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A unit of work that needs one user of a specific role.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Task {
    pub task_id: i64,
    pub description: String,
    pub deadline: NaiveDate,
    /// 1 (lowest) to 5 (highest).
    pub priority: u8,
    /// Estimated effort in hours. Always positive.
    pub estimated_time: f64,
    pub needed_role: String,
}
