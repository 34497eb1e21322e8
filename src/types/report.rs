//! Archived settlement reports
//!
//! A report freezes one settlement output under a calendar date. Once
//! created it is never recomputed, even if the transfers it was derived
//! from are later removed.

use super::transfer::SettlementTransfer;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Report identifier (UUID v4)
pub type ReportId = String;

/// A frozen snapshot of a settlement plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Unique report identifier
    pub id: ReportId,

    /// Human-readable form of `date`, e.g. `Monday 19 October 2026`
    pub label: String,

    /// Calendar date the settlement applies to
    pub date: NaiveDate,

    /// Moment the report was archived
    pub created_at: DateTime<Utc>,

    /// Settlement transfers at the time of archiving
    pub transfers: Vec<SettlementTransfer>,
}
