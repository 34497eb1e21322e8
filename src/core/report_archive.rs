//! Archive of validated settlement reports
//!
//! Reports are stored newest first. Each one holds its own copy of the
//! settlement transfers, so later ledger changes never alter it.

use crate::types::{LedgerError, Report, SettlementTransfer};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Long-form label format for report dates, e.g. `Monday 19 October 2026`
const LABEL_FORMAT: &str = "%A %d %B %Y";

/// Ordered collection of archived reports, newest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportArchive {
    reports: Vec<Report>,
}

impl ReportArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild an archive from reports already ordered newest first
    pub fn from_reports(reports: Vec<Report>) -> Self {
        ReportArchive { reports }
    }

    /// Freeze `transfers` into a new report for `date`
    ///
    /// The new report is placed at the front of the archive.
    pub fn archive(
        &mut self,
        date: NaiveDate,
        transfers: &[SettlementTransfer],
        now: DateTime<Utc>,
    ) -> &Report {
        let report = Report {
            id: Uuid::new_v4().to_string(),
            label: date.format(LABEL_FORMAT).to_string(),
            date,
            created_at: now,
            transfers: transfers.to_vec(),
        };
        self.reports.insert(0, report);
        &self.reports[0]
    }

    /// Remove the report with the given id
    pub fn remove(&mut self, id: &str) -> Result<Report, LedgerError> {
        let position = self
            .reports
            .iter()
            .position(|report| report.id == id)
            .ok_or_else(|| LedgerError::report_not_found(id))?;
        Ok(self.reports.remove(position))
    }

    pub fn get(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|report| report.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Report> {
        self.reports.iter()
    }

    pub fn as_slice(&self) -> &[Report] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn plan() -> Vec<SettlementTransfer> {
        vec![SettlementTransfer::new("A", "B", Decimal::from(100))]
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_archive_freezes_snapshot() {
        let mut archive = ReportArchive::new();
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap();
        let mut transfers = plan();

        let id = archive.archive(date(2026, 10, 19), &transfers, now).id.clone();
        transfers.clear();

        let report = archive.get(&id).unwrap();
        assert_eq!(report.transfers, plan());
        assert_eq!(report.created_at, now);
        assert_eq!(report.date, date(2026, 10, 19));
    }

    #[test]
    fn test_label_is_long_form_date() {
        let mut archive = ReportArchive::new();
        let report = archive.archive(date(2026, 10, 19), &plan(), Utc::now());
        assert_eq!(report.label, "Monday 19 October 2026");
    }

    #[test]
    fn test_newest_report_first() {
        let mut archive = ReportArchive::new();
        archive.archive(date(2026, 1, 1), &plan(), Utc::now());
        archive.archive(date(2026, 2, 1), &plan(), Utc::now());

        let dates: Vec<_> = archive.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(2026, 2, 1), date(2026, 1, 1)]);
    }

    #[test]
    fn test_remove() {
        let mut archive = ReportArchive::new();
        let id = archive.archive(date(2026, 3, 4), &plan(), Utc::now()).id.clone();

        let removed = archive.remove(&id).unwrap();
        assert_eq!(removed.id, id);
        assert!(archive.is_empty());
        assert_eq!(
            archive.remove(&id),
            Err(LedgerError::report_not_found(&id))
        );
    }
}
