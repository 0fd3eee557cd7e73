//! Check-in streak and 7-day cycle computation.
//!
//! A user checks in at most once per calendar day. Seven consecutive days
//! complete a cycle, which is rewarded once; the record on which the reward
//! was granted becomes the *anchor* and the next cycle starts counting from
//! the day after it.
//!
//! All functions here work on a plain slice of [`CheckinDay`] values so they
//! can be exercised without a database.

use std::collections::BTreeSet;
use std::ops::Bound;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::reward::{RewardEntry, RewardUnit};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of consecutive days that make up one cycle.
pub const CYCLE_LENGTH: usize = 7;

/// How many of the most recent check-in records are considered when
/// computing the streak.
pub const STREAK_WINDOW: i64 = 120;

/// Ledger `reward_type` used for cycle completion rewards.
pub const REWARD_TYPE_CHECKIN: &str = "checkin";

/// Coupons granted when a cycle completes.
pub const CYCLE_REWARD_COUPONS: i32 = 3;

/// Water units granted when a cycle completes.
pub const CYCLE_REWARD_WATER: i32 = 2;

/// The two ledger rows written when a cycle completes.
pub fn cycle_reward_bundle() -> [RewardEntry; 2] {
    [
        RewardEntry {
            reward_type: REWARD_TYPE_CHECKIN,
            amount: CYCLE_REWARD_COUPONS,
            unit: RewardUnit::Coupon,
        },
        RewardEntry {
            reward_type: REWARD_TYPE_CHECKIN,
            amount: CYCLE_REWARD_WATER,
            unit: RewardUnit::Water,
        },
    ]
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One check-in as seen by the streak algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckinDay {
    pub day: NaiveDate,
    pub rewarded: bool,
}

/// Streak and display state derived from a user's check-in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleSummary {
    pub streak: u32,
    pub week_count: u32,
    pub week_stamps: [bool; CYCLE_LENGTH],
    pub today_checked: bool,
    /// Day of the most recent rewarded check-in, if any.
    #[serde(skip)]
    pub anchor: Option<NaiveDate>,
}

impl CycleSummary {
    /// Compute the summary for `today` from a check-in history in any order.
    ///
    /// Records dated after `today` are ignored.
    pub fn compute(history: &[CheckinDay], today: NaiveDate) -> Self {
        let days: BTreeSet<NaiveDate> = history
            .iter()
            .map(|c| c.day)
            .filter(|d| *d <= today)
            .collect();
        let anchor = last_reward_anchor(history, today);
        let streak = effective_streak(&days, anchor, today);
        let week_stamps = cycle_stamps(&days, anchor, streak, today);
        let week_count = week_stamps.iter().filter(|s| **s).count() as u32;

        Self {
            streak,
            week_count,
            week_stamps,
            today_checked: days.contains(&today),
            anchor,
        }
    }

    /// Whether the check-in made `today` completes a fresh cycle.
    ///
    /// A cycle already rewarded today never completes again.
    pub fn completes_cycle(&self, today: NaiveDate) -> bool {
        self.streak as usize == CYCLE_LENGTH && self.anchor != Some(today)
    }
}

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// Most recent rewarded day on or before `today`.
pub fn last_reward_anchor(history: &[CheckinDay], today: NaiveDate) -> Option<NaiveDate> {
    history
        .iter()
        .filter(|c| c.rewarded && c.day <= today)
        .map(|c| c.day)
        .max()
}

/// Length of the consecutive-day run ending `today`.
///
/// With an anchor today the completed cycle is reported as a full streak.
/// With an older anchor only days strictly after it count.
fn effective_streak(
    days: &BTreeSet<NaiveDate>,
    anchor: Option<NaiveDate>,
    today: NaiveDate,
) -> u32 {
    if anchor == Some(today) {
        return CYCLE_LENGTH as u32;
    }

    let mut run = 0;
    let mut cursor = today;
    while days.contains(&cursor) && anchor.map_or(true, |a| cursor > a) {
        run += 1;
        match cursor.pred_opt() {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    run
}

/// Seven display slots for the current cycle.
///
/// With a past anchor every check-in after it fills the next slot from the
/// left, whatever its date. Without an anchor the slots are the calendar
/// days starting where the current run began.
fn cycle_stamps(
    days: &BTreeSet<NaiveDate>,
    anchor: Option<NaiveDate>,
    streak: u32,
    today: NaiveDate,
) -> [bool; CYCLE_LENGTH] {
    let mut stamps = [false; CYCLE_LENGTH];
    match anchor {
        Some(a) if a == today => stamps = [true; CYCLE_LENGTH],
        Some(a) => {
            let since_anchor = days.range((Bound::Excluded(a), Bound::Unbounded)).count();
            for stamp in stamps.iter_mut().take(since_anchor) {
                *stamp = true;
            }
        }
        None => {
            let start = today - Duration::days(i64::from(streak.saturating_sub(1)));
            for (offset, stamp) in stamps.iter_mut().enumerate() {
                *stamp = days.contains(&(start + Duration::days(offset as i64)));
            }
        }
    }
    stamps
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
