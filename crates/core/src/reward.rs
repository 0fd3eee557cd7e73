//! Reward ledger vocabulary shared by every award path.

use serde::{Deserialize, Serialize};

/// What a ledger row's `amount` is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardUnit {
    Coupon,
    Water,
}

impl RewardUnit {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Coupon => "coupon",
            Self::Water => "water",
        }
    }
}

/// A single row to append to the `user_rewards` ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardEntry {
    pub reward_type: &'static str,
    pub amount: i32,
    pub unit: RewardUnit,
}

impl RewardEntry {
    /// Increment this entry applies to `users.coupon_count`.
    pub fn coupon_delta(&self) -> i32 {
        match self.unit {
            RewardUnit::Coupon => self.amount,
            RewardUnit::Water => 0,
        }
    }

    /// Increment this entry applies to `users.water_stock` and
    /// `users.total_water_given`.
    pub fn water_delta(&self) -> i32 {
        match self.unit {
            RewardUnit::Water => self.amount,
            RewardUnit::Coupon => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_follow_unit() {
        let coupon = RewardEntry {
            reward_type: "checkin",
            amount: 3,
            unit: RewardUnit::Coupon,
        };
        assert_eq!((coupon.coupon_delta(), coupon.water_delta()), (3, 0));

        let water = RewardEntry {
            unit: RewardUnit::Water,
            ..coupon
        };
        assert_eq!((water.coupon_delta(), water.water_delta()), (0, 3));
    }

    #[test]
    fn unit_names_match_storage() {
        assert_eq!(RewardUnit::Coupon.as_str(), "coupon");
        assert_eq!(serde_json::to_value(RewardUnit::Water).unwrap(), "water");
    }
}
