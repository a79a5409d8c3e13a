//! Background scheduler configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchedulerConfig {
    /// Seconds between automatic scheduling batches while serving.
    /// `0` disables the background loop; batches then run only on demand.
    #[serde(default)]
    pub interval_secs: u64,
}

impl SchedulerConfig {
    /// The tick interval, or `None` when the background loop is disabled.
    pub const fn interval(&self) -> Option<Duration> {
        if self.interval_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.interval_secs))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_by_default() {
        assert!(SchedulerConfig::default().interval().is_none());
    }

    #[test]
    fn interval_in_seconds() {
        let config = SchedulerConfig { interval_secs: 90 };
        assert_eq!(config.interval(), Some(Duration::from_secs(90)));
    }
}
