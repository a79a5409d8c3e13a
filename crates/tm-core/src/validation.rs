//! Field rules for tasks and users.
//!
//! The same checks run on create and after a partial update is applied, so a
//! task can never be patched into a state it could not have been created in.

use chrono::{Days, NaiveDate};

use crate::entities::Task;
use crate::errors::CoreError;

/// Longest accepted task description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 300;

pub const MIN_PRIORITY: u8 = 1;
pub const MAX_PRIORITY: u8 = 5;
pub const DEFAULT_PRIORITY: u8 = 3;

/// Default effort for a task created without an estimate, in hours.
pub const DEFAULT_ESTIMATED_TIME: f64 = 1.0;

/// Default deadline: tomorrow.
#[must_use]
pub fn default_deadline(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

/// Normalize a role tag: trimmed and lower-cased. Empty roles are rejected.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the role is blank.
pub fn normalize_role(role: &str) -> Result<String, CoreError> {
    let role = role.trim().to_lowercase();
    if role.is_empty() {
        return Err(CoreError::Validation("role must not be empty".into()));
    }
    Ok(role)
}

/// # Errors
///
/// Returns `CoreError::Validation` if the description is longer than
/// [`MAX_DESCRIPTION_LEN`] characters.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    let len = description.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "description is {len} characters, at most {MAX_DESCRIPTION_LEN} allowed"
        )));
    }
    Ok(())
}

/// # Errors
///
/// Returns `CoreError::Validation` if the deadline is earlier than `today`.
pub fn validate_deadline(deadline: NaiveDate, today: NaiveDate) -> Result<(), CoreError> {
    if deadline < today {
        return Err(CoreError::Validation(format!(
            "deadline {deadline} is in the past (today is {today})"
        )));
    }
    Ok(())
}

/// # Errors
///
/// Returns `CoreError::Validation` if the priority is outside 1..=5.
pub fn validate_priority(priority: u8) -> Result<(), CoreError> {
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        return Err(CoreError::Validation(format!(
            "priority must be between {MIN_PRIORITY} and {MAX_PRIORITY}, got {priority}"
        )));
    }
    Ok(())
}

/// # Errors
///
/// Returns `CoreError::Validation` unless the estimate is finite and positive.
pub fn validate_estimated_time(hours: f64) -> Result<(), CoreError> {
    if !hours.is_finite() || hours <= 0.0 {
        return Err(CoreError::Validation(format!(
            "estimated_time must be a positive number of hours, got {hours}"
        )));
    }
    Ok(())
}

/// Minimal shape check; deliverability is not our concern.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the address has no `@` or an empty side.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!("invalid email address '{email}'"))),
    }
}

/// Validate every field of a complete task.
///
/// # Errors
///
/// Returns the first `CoreError::Validation` encountered.
pub fn validate_task(task: &Task, today: NaiveDate) -> Result<(), CoreError> {
    validate_description(&task.description)?;
    validate_deadline(task.deadline, today)?;
    validate_priority(task.priority)?;
    validate_estimated_time(task.estimated_time)?;
    if task.needed_role.is_empty() {
        return Err(CoreError::Validation("needed_role must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    #[test]
    fn default_deadline_is_tomorrow() {
        assert_eq!(
            default_deadline(today()),
            NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
        );
    }

    #[rstest]
    #[case("Senior", "senior")]
    #[case("  team LEAD ", "team lead")]
    #[case("junior", "junior")]
    fn roles_are_trimmed_and_lowercased(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_role(input).unwrap(), expected);
    }

    #[test]
    fn blank_role_rejected() {
        assert!(matches!(normalize_role("   "), Err(CoreError::Validation(_))));
    }

    #[test]
    fn description_limit_counts_characters_not_bytes() {
        let cyrillic = "ж".repeat(MAX_DESCRIPTION_LEN);
        assert!(validate_description(&cyrillic).is_ok());
        let too_long = "x".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(validate_description(&too_long).is_err());
    }

    #[test]
    fn deadline_today_allowed_yesterday_rejected() {
        assert!(validate_deadline(today(), today()).is_ok());
        let yesterday = today().pred_opt().unwrap();
        assert!(validate_deadline(yesterday, today()).is_err());
    }

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(3, true)]
    #[case(5, true)]
    #[case(6, false)]
    fn priority_bounds(#[case] priority: u8, #[case] ok: bool) {
        assert_eq!(validate_priority(priority).is_ok(), ok);
    }

    #[rstest]
    #[case(0.5, true)]
    #[case(0.0, false)]
    #[case(-1.0, false)]
    #[case(f64::NAN, false)]
    #[case(f64::INFINITY, false)]
    fn estimated_time_must_be_positive(#[case] hours: f64, #[case] ok: bool) {
        assert_eq!(validate_estimated_time(hours).is_ok(), ok);
    }

    #[rstest]
    #[case("user@example.com", true)]
    #[case("userexample.com", false)]
    #[case("@example.com", false)]
    #[case("user@", false)]
    fn email_shape(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(validate_email(email).is_ok(), ok);
    }

    #[test]
    fn validate_task_checks_every_field() {
        let task = Task {
            task_id: 1,
            description: "Write release notes".into(),
            deadline: today(),
            priority: 3,
            estimated_time: 2.0,
            needed_role: "senior".into(),
        };
        assert!(validate_task(&task, today()).is_ok());

        let bad = Task {
            priority: 9,
            ..task.clone()
        };
        assert!(validate_task(&bad, today()).is_err());

        let roleless = Task {
            needed_role: String::new(),
            ..task
        };
        assert!(validate_task(&roleless, today()).is_err());
    }
}
