//! Input drafts for creating users and tasks.
//!
//! A draft is what a client sends. `validate()` applies defaults and
//! normalisation and returns the fields the store will persist.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;
use crate::validation::{
    DEFAULT_ESTIMATED_TIME, DEFAULT_PRIORITY, default_deadline, normalize_role,
    validate_deadline, validate_description, validate_email, validate_estimated_time,
    validate_priority,
};

/// Client-supplied fields for a new task. Omitted optionals get defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct NewTask {
    pub description: String,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub estimated_time: Option<f64>,
    pub needed_role: String,
}

/// Validated task fields, ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFields {
    pub description: String,
    pub deadline: NaiveDate,
    pub priority: u8,
    pub estimated_time: f64,
    pub needed_role: String,
}

impl NewTask {
    #[must_use]
    pub fn new(description: impl Into<String>, needed_role: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            deadline: None,
            priority: None,
            estimated_time: None,
            needed_role: needed_role.into(),
        }
    }

    #[must_use]
    pub fn estimated_time(mut self, hours: f64) -> Self {
        self.estimated_time = Some(hours);
        self
    }

    #[must_use]
    pub fn priority(mut self, priority: u8) -> Self {
        self.priority = Some(priority);
        self
    }

    #[must_use]
    pub fn deadline(mut self, deadline: NaiveDate) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Apply defaults, lower-case the role, and check every field.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for the first field that fails.
    pub fn validate(self, today: NaiveDate) -> Result<TaskFields, CoreError> {
        validate_description(&self.description)?;
        let deadline = self.deadline.unwrap_or_else(|| default_deadline(today));
        validate_deadline(deadline, today)?;
        let priority = self.priority.unwrap_or(DEFAULT_PRIORITY);
        validate_priority(priority)?;
        let estimated_time = self.estimated_time.unwrap_or(DEFAULT_ESTIMATED_TIME);
        validate_estimated_time(estimated_time)?;
        let needed_role = normalize_role(&self.needed_role)?;

        Ok(TaskFields {
            description: self.description,
            deadline,
            priority,
            estimated_time,
            needed_role,
        })
    }
}

/// Sign-up payload.
///
/// There is no `workload` field: a new user holds no assignments, so their
/// workload starts at zero.
#[derive(Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .finish()
    }
}

impl NewUser {
    /// Trim the email, normalize the role, and reject empty credentials.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a malformed email, empty password,
    /// or blank role.
    pub fn validate(mut self) -> Result<Self, CoreError> {
        self.email = self.email.trim().to_string();
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(CoreError::Validation("password must not be empty".into()));
        }
        self.role = normalize_role(&self.role)?;
        Ok(self)
    }
}
