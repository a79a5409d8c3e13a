use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A person who can be assigned tasks.
///
/// `workload` is the running sum of `estimated_time` over every task
/// currently assigned to this user. The password hash is deliberately not
/// part of this struct; it is only read by the login path.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct User {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub workload: f64,
}

impl User {
    /// Whether this user may hold a task that needs `role`.
    ///
    /// Exact string equality; there is no seniority ordering between roles.
    #[must_use]
    pub fn is_eligible_for(&self, role: &str) -> bool {
        self.role == role
    }
}
