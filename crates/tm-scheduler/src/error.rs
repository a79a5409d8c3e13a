use thiserror::Error;

/// Failures reported by a [`ScheduleStore`](crate::ScheduleStore).
///
/// A batch either commits completely or not at all, so both variants mean
/// nothing from the batch was persisted.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness violation or concurrent modification. The caller may retry
    /// the whole `schedule()` call.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Anything else the store could not do (I/O, connectivity, corrupt rows).
    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

impl StoreError {
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
