//! Injectable time source and the reward calendar.
//!
//! Day boundaries for check-ins are computed in a fixed UTC offset taken from
//! configuration rather than from the host's local timezone.

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Source of "now" for the reward engine.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock frozen at a single instant. Used by tests to walk through days.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}

/// Largest offset accepted from configuration (±14h, the real-world range).
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Maps instants to calendar days in the reward timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardCalendar {
    offset: FixedOffset,
}

impl RewardCalendar {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    /// Build a calendar from an offset east of UTC in minutes (KST is `540`).
    pub fn from_offset_minutes(minutes: i32) -> Result<Self, CoreError> {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(CoreError::Validation(format!(
                "UTC offset must be within ±{MAX_OFFSET_MINUTES} minutes, got {minutes}"
            )));
        }
        FixedOffset::east_opt(minutes * 60)
            .map(|offset| Self { offset })
            .ok_or_else(|| CoreError::Validation(format!("Invalid UTC offset: {minutes}")))
    }

    /// Calendar day that contains `at`.
    pub fn day_of(&self, at: Timestamp) -> NaiveDate {
        at.with_timezone(&self.offset).date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kst() -> RewardCalendar {
        RewardCalendar::from_offset_minutes(540).unwrap()
    }

    #[test]
    fn late_utc_evening_is_next_day_in_kst() {
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 16, 30, 0).unwrap();
        assert_eq!(kst().day_of(at), NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(RewardCalendar::utc().day_of(at), NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert!(RewardCalendar::from_offset_minutes(15 * 60).is_err());
        assert!(RewardCalendar::from_offset_minutes(-(15 * 60)).is_err());
    }

    #[test]
    fn fixed_clock_returns_its_instant() {
        let at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(FixedClock(at).now(), at);
    }
}
