use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Links one task to the user who performs it. A task has at most one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub assignment_id: i64,
    pub task_id: i64,
    pub user_id: i64,
}
