use chrono::{DateTime, Duration, Utc};

use crate::domain::version::SemVer;

pub const DEFAULT_CHECK_INTERVAL_HOURS: i64 = 24;

/// Record of the last remote version check, persisted between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateCache {
    pub last_checked: Option<DateTime<Utc>>,
    pub last_known_latest: Option<SemVer>,
}

impl UpdateCache {
    pub fn should_check_now(&self, now: DateTime<Utc>, interval: Duration) -> bool {
        match self.last_checked {
            None => true,
            Some(last) => now - last >= interval,
        }
    }

    /// A failed fetch passes `None` and keeps whatever latest was known before.
    pub fn record_check(self, now: DateTime<Utc>, latest: Option<SemVer>) -> Self {
        Self {
            last_checked: Some(now),
            last_known_latest: latest.or(self.last_known_latest),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The gate was closed; no network attempt was made.
    NoCheckPerformed,
    CheckFailed(String),
    UpToDate {
        current: SemVer,
    },
    UpdateAvailable {
        current: SemVer,
        latest: SemVer,
    },
}
