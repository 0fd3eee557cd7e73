//! Tree growth rules: water amounts per source, lifecycle states, and the
//! step computed for each watering.
//!
//! A tree completes once it has received [`REQUIRED_WATER`] units. Overflow
//! from the completing grant is not carried into the next tree.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Water units needed to complete one tree.
pub const REQUIRED_WATER: i32 = 15;

/// Water granted for clearing a course.
pub const COURSE_WATER: i32 = 3;

/// Water granted for clearing an escape chapter.
pub const ESCAPE_WATER: i32 = 5;

/// Water granted when no explicit amount applies.
pub const DEFAULT_WATER: i32 = 1;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Origin of a water grant, stored on every `water_logs` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterSource {
    Course,
    Escape,
    Admin,
    Bonus,
}

impl WaterSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Course => "course",
            Self::Escape => "escape",
            Self::Admin => "admin",
            Self::Bonus => "bonus",
        }
    }

    /// Parse a client-supplied source name. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "course" => Some(Self::Course),
            "escape" => Some(Self::Escape),
            "admin" => Some(Self::Admin),
            "bonus" => Some(Self::Bonus),
            _ => None,
        }
    }
}

/// Lifecycle state of a tree (`trees.status`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TreeStatus {
    Seedling,
    Growing,
    Completed,
}

impl TreeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Seedling => "seedling",
            Self::Growing => "growing",
            Self::Completed => "completed",
        }
    }
}

// ---------------------------------------------------------------------------
// Grant resolution
// ---------------------------------------------------------------------------

/// A resolved water grant: where it came from and how much it is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaterGrant {
    pub source: WaterSource,
    pub amount: i32,
}

/// Resolve the grant for a request.
///
/// Course and escape grants have fixed amounts and ignore any override.
/// Admin and bonus grants take the caller's amount (default
/// [`DEFAULT_WATER`]), bounded to `1..=REQUIRED_WATER`. A missing or unknown
/// source is recorded as a one-unit bonus.
pub fn resolve_water_grant(
    source: Option<&str>,
    amount: Option<i32>,
) -> Result<WaterGrant, CoreError> {
    let grant = match source.and_then(WaterSource::parse) {
        Some(WaterSource::Course) => WaterGrant {
            source: WaterSource::Course,
            amount: COURSE_WATER,
        },
        Some(WaterSource::Escape) => WaterGrant {
            source: WaterSource::Escape,
            amount: ESCAPE_WATER,
        },
        Some(source @ (WaterSource::Admin | WaterSource::Bonus)) => WaterGrant {
            source,
            amount: validate_override(amount)?,
        },
        None => WaterGrant {
            source: WaterSource::Bonus,
            amount: DEFAULT_WATER,
        },
    };
    Ok(grant)
}

fn validate_override(amount: Option<i32>) -> Result<i32, CoreError> {
    match amount {
        None => Ok(DEFAULT_WATER),
        Some(a) if (1..=REQUIRED_WATER).contains(&a) => Ok(a),
        Some(a) => Err(CoreError::Validation(format!(
            "amount must be between 1 and {REQUIRED_WATER}, got {a}"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Growth step
// ---------------------------------------------------------------------------

/// Outcome of applying one grant to the current tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthStep {
    /// New stored `water_count` (may exceed [`REQUIRED_WATER`]).
    pub next_count: i32,
    pub status: TreeStatus,
    pub completed: bool,
}

/// Compute the tree state after adding `amount` to `current`.
pub fn plan_watering(current: i32, amount: i32) -> GrowthStep {
    let next_count = current.saturating_add(amount);
    let completed = next_count >= REQUIRED_WATER;
    GrowthStep {
        next_count,
        status: if completed {
            TreeStatus::Completed
        } else {
            TreeStatus::Growing
        },
        completed,
    }
}

/// Water count as shown to clients: never above [`REQUIRED_WATER`].
pub fn display_water_count(stored: i32) -> i32 {
    stored.clamp(0, REQUIRED_WATER)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn fixed_sources_ignore_override() {
        let grant = resolve_water_grant(Some("course"), Some(10)).unwrap();
        assert_eq!(grant.amount, COURSE_WATER);
        let grant = resolve_water_grant(Some("ESCAPE"), None).unwrap();
        assert_eq!(grant.source, WaterSource::Escape);
        assert_eq!(grant.amount, ESCAPE_WATER);
    }

    #[test]
    fn admin_and_bonus_take_caller_amount() {
        let grant = resolve_water_grant(Some("admin"), Some(7)).unwrap();
        assert_eq!(grant, WaterGrant { source: WaterSource::Admin, amount: 7 });
        let grant = resolve_water_grant(Some("bonus"), None).unwrap();
        assert_eq!(grant.amount, DEFAULT_WATER);
    }

    #[test]
    fn override_out_of_range_is_rejected() {
        assert_matches!(
            resolve_water_grant(Some("bonus"), Some(0)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            resolve_water_grant(Some("admin"), Some(REQUIRED_WATER + 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn unknown_or_missing_source_is_one_unit_bonus() {
        for source in [None, Some("mystery"), Some("")] {
            let grant = resolve_water_grant(source, Some(9)).unwrap();
            assert_eq!(grant, WaterGrant { source: WaterSource::Bonus, amount: 1 });
        }
    }

    #[test]
    fn three_escape_grants_complete_a_tree() {
        let first = plan_watering(0, ESCAPE_WATER);
        assert_eq!(first.status, TreeStatus::Growing);
        let second = plan_watering(first.next_count, ESCAPE_WATER);
        assert!(!second.completed);
        let third = plan_watering(second.next_count, ESCAPE_WATER);
        assert!(third.completed);
        assert_eq!(third.status, TreeStatus::Completed);
        assert_eq!(third.next_count, REQUIRED_WATER);
    }

    #[test]
    fn overflow_is_stored_but_clamped_for_display() {
        let step = plan_watering(14, ESCAPE_WATER);
        assert!(step.completed);
        assert_eq!(step.next_count, 19);
        assert_eq!(display_water_count(step.next_count), REQUIRED_WATER);
    }

    #[test]
    fn status_names_match_storage() {
        assert_eq!(TreeStatus::Seedling.as_str(), "seedling");
        assert_eq!(WaterSource::Bonus.as_str(), "bonus");
    }
}
