//! Escape story completion and place-clear coupon rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::reward::{RewardEntry, RewardUnit};

/// Ledger `reward_type` for the one-time coupon granted per cleared place.
pub const REWARD_TYPE_PLACE_CLEAR: &str = "escape_place_clear";

/// Coupons granted for the first clear of a place.
pub const PLACE_CLEAR_COUPONS: i32 = 1;

/// Chapter recorded on the progress row when a story is completed.
pub const COMPLETION_CHAPTER: i32 = 1;

/// Ledger row written on the first clear of a place.
pub fn place_clear_reward() -> RewardEntry {
    RewardEntry {
        reward_type: REWARD_TYPE_PLACE_CLEAR,
        amount: PLACE_CLEAR_COUPONS,
        unit: RewardUnit::Coupon,
    }
}

/// Where a user is within a story (`user_story_progress.status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl StoryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

/// Validate a chapter pointer against the story's chapter count.
pub fn validate_chapter(chapter: i32, chapter_count: i32) -> Result<(), CoreError> {
    if chapter < 1 || chapter > chapter_count.max(1) {
        return Err(CoreError::Validation(format!(
            "currentChapter must be between 1 and {}, got {chapter}",
            chapter_count.max(1)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_bounds() {
        assert!(validate_chapter(1, 5).is_ok());
        assert!(validate_chapter(5, 5).is_ok());
        assert!(validate_chapter(0, 5).is_err());
        assert!(validate_chapter(6, 5).is_err());
    }

    #[test]
    fn story_without_chapter_count_accepts_first_chapter() {
        assert!(validate_chapter(1, 0).is_ok());
        assert!(validate_chapter(2, 0).is_err());
    }

    #[test]
    fn place_clear_reward_is_one_coupon() {
        let entry = place_clear_reward();
        assert_eq!(entry.reward_type, "escape_place_clear");
        assert_eq!(entry.coupon_delta(), 1);
        assert_eq!(entry.water_delta(), 0);
    }

    #[test]
    fn status_names_match_storage() {
        assert_eq!(StoryStatus::InProgress.as_str(), "in_progress");
        assert_eq!(
            serde_json::to_value(StoryStatus::NotStarted).unwrap(),
            "not_started"
        );
    }
}
