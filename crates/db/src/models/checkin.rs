//! Check-in ledger rows.

use chrono::NaiveDate;
use escapade_core::checkin::CheckinDay;
use escapade_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `checkin_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub checked_at: Timestamp,
    pub checkin_day: NaiveDate,
    pub rewarded: bool,
}

impl From<&CheckinRecord> for CheckinDay {
    fn from(record: &CheckinRecord) -> Self {
        CheckinDay {
            day: record.checkin_day,
            rewarded: record.rewarded,
        }
    }
}
