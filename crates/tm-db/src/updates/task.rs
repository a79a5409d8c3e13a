//! Task update builder.
//!
//! Every field is optional; `None` leaves the stored value alone. The type
//! deserializes straight from a PATCH body and rejects unknown fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needed_role: Option<String>,
}

impl TaskUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.deadline.is_none()
            && self.priority.is_none()
            && self.estimated_time.is_none()
            && self.needed_role.is_none()
    }
}

#[derive(Default)]
pub struct TaskUpdateBuilder(TaskUpdate);

impl TaskUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TaskUpdate::default())
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.0.deadline = Some(deadline);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: u8) -> Self {
        self.0.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn estimated_time(mut self, hours: f64) -> Self {
        self.0.estimated_time = Some(hours);
        self
    }

    #[must_use]
    pub fn needed_role(mut self, role: impl Into<String>) -> Self {
        self.0.needed_role = Some(role.into());
        self
    }

    #[must_use]
    pub fn build(self) -> TaskUpdate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_sets_only_named_fields() {
        let update = TaskUpdateBuilder::new().priority(5).estimated_time(2.5).build();
        assert_eq!(
            update,
            TaskUpdate {
                priority: Some(5),
                estimated_time: Some(2.5),
                ..TaskUpdate::default()
            }
        );
        assert!(!update.is_empty());
        assert!(TaskUpdateBuilder::new().build().is_empty());
    }

    #[test]
    fn patch_body_rejects_unknown_fields() {
        let ok: TaskUpdate = serde_json::from_str(r#"{"priority": 2}"#).unwrap();
        assert_eq!(ok.priority, Some(2));
        assert!(serde_json::from_str::<TaskUpdate>(r#"{"owner": "bob"}"#).is_err());
    }

    #[test]
    fn serializes_only_set_fields() {
        let update = TaskUpdateBuilder::new().needed_role("qa").build();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"needed_role": "qa"})
        );
    }
}
