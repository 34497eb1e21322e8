//! CSV format handling for transfer records and derived output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvTransfer structure for deserialization
//! - Conversion from CSV records to validated transfers
//! - Serialization of derived transfers, the ledger and archived reports
//!
//! All functions are pure (no file access) for easy testing.

use crate::core::validation::TransferDraft;
use crate::types::{AccountId, Report, SettlementTransfer, Transfer};
use csv::Writer;
use serde::Deserialize;
use std::io::Write;
use uuid::Uuid;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: from, to, amount, label, id.
/// `label` and `id` are optional and may be omitted from the header entirely.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvTransfer {
    pub from: String,
    pub to: String,
    pub amount: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Convert a CsvTransfer to a validated Transfer
///
/// Rows without an id receive a fresh UUID. The row goes through the same
/// validation as interactively entered transfers.
///
/// # Returns
///
/// Result containing either:
/// - Ok(Transfer) - Successfully validated transfer
/// - Err(String) - Error message describing why the row was rejected
pub fn convert_csv_record(record: CsvTransfer) -> Result<Transfer, String> {
    let id = record
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let draft = TransferDraft::new(
        record.from,
        record.to,
        record.amount,
        record.label.unwrap_or_default(),
    );
    draft.validate(id).map_err(|e| e.to_string())
}

/// Write derived transfers (settlement or grouped) as `from,to,amount`
///
/// Rows keep the order of `transfers`; that order is part of the output.
pub fn write_transfers_csv(
    transfers: &[SettlementTransfer],
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["from", "to", "amount"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for transfer in transfers {
        let amount = transfer.amount.normalize().to_string();
        writer
            .write_record([transfer.from.as_str(), transfer.to.as_str(), amount.as_str()])
            .map_err(|e| format!("Failed to write transfer record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

/// Write recorded transfers as `id,from,to,amount,label`
pub fn write_ledger_csv(transfers: &[Transfer], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["id", "from", "to", "amount", "label"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for transfer in transfers {
        let amount = transfer.amount.normalize().to_string();
        writer
            .write_record([
                transfer.id.as_str(),
                transfer.from.as_str(),
                transfer.to.as_str(),
                amount.as_str(),
                transfer.label.as_deref().unwrap_or_default(),
            ])
            .map_err(|e| format!("Failed to write transfer record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

/// Write registered account names, one per row
pub fn write_accounts_csv(accounts: &[AccountId], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["account"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for account in accounts {
        writer
            .write_record([account.as_str()])
            .map_err(|e| format!("Failed to write account record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

/// Write archived reports, one row per settlement transfer
///
/// Columns: report, date, label, created_at, from, to, amount. A report with
/// no transfers is not representable and produces no rows.
pub fn write_reports_csv(reports: &[Report], output: &mut dyn Write) -> Result<(), String> {
    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["report", "date", "label", "created_at", "from", "to", "amount"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for report in reports {
        let date = report.date.to_string();
        let created_at = report.created_at.to_rfc3339();
        for transfer in &report.transfers {
            let amount = transfer.amount.normalize().to_string();
            writer
                .write_record([
                    report.id.as_str(),
                    date.as_str(),
                    report.label.as_str(),
                    created_at.as_str(),
                    transfer.from.as_str(),
                    transfer.to.as_str(),
                    amount.as_str(),
                ])
                .map_err(|e| format!("Failed to write report record: {}", e))?;
        }
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn csv_record(from: &str, to: &str, amount: &str) -> CsvTransfer {
        CsvTransfer {
            from: from.to_string(),
            to: to.to_string(),
            amount: amount.to_string(),
            label: None,
            id: None,
        }
    }

    #[test]
    fn test_convert_csv_record_valid() {
        let mut record = csv_record("Alice", "Bob", "150");
        record.label = Some("rent".to_string());
        record.id = Some(" t-7 ".to_string());

        let transfer = convert_csv_record(record).unwrap();
        assert_eq!(transfer.id, "t-7");
        assert_eq!(transfer.from, "Alice");
        assert_eq!(transfer.to, "Bob");
        assert_eq!(transfer.amount, Decimal::from(150));
        assert_eq!(transfer.label.as_deref(), Some("rent"));
    }

    #[rstest]
    #[case::missing_id(None)]
    #[case::blank_id(Some("   "))]
    fn test_convert_csv_record_generates_id(#[case] id: Option<&str>) {
        let mut record = csv_record("Alice", "Bob", "1");
        record.id = id.map(str::to_string);

        let transfer = convert_csv_record(record).unwrap();
        assert!(Uuid::parse_str(&transfer.id).is_ok());
    }

    #[rstest]
    #[case::self_transfer("Alice", "Alice", "10", "must differ")]
    #[case::missing_account("", "Bob", "10", "Select both")]
    #[case::invalid_amount("Alice", "Bob", "ten", "Invalid amount")]
    #[case::zero_amount("Alice", "Bob", "0", "Invalid amount")]
    fn test_convert_csv_record_errors(
        #[case] from: &str,
        #[case] to: &str,
        #[case] amount: &str,
        #[case] expected_error: &str,
    ) {
        let result = convert_csv_record(csv_record(from, to, amount));
        assert!(result.unwrap_err().contains(expected_error));
    }

    #[rstest]
    #[case::single(
        vec![SettlementTransfer::new("A", "B", Decimal::from(100))],
        "from,to,amount\nA,B,100\n"
    )]
    #[case::order_preserved(
        vec![
            SettlementTransfer::new("C", "A", Decimal::from(5)),
            SettlementTransfer::new("A", "B", Decimal::from(200)),
        ],
        "from,to,amount\nC,A,5\nA,B,200\n"
    )]
    #[case::normalized_amount(
        vec![SettlementTransfer::new("A", "B", Decimal::new(1200, 2))],
        "from,to,amount\nA,B,12\n"
    )]
    #[case::quoted_names(
        vec![SettlementTransfer::new("Smith, J", "B", Decimal::from(1))],
        "from,to,amount\n\"Smith, J\",B,1\n"
    )]
    #[case::empty(vec![], "from,to,amount\n")]
    fn test_write_transfers_csv(
        #[case] transfers: Vec<SettlementTransfer>,
        #[case] expected_output: &str,
    ) {
        let mut output = Vec::new();
        write_transfers_csv(&transfers, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), expected_output);
    }

    #[test]
    fn test_write_ledger_csv() {
        let transfers = vec![
            Transfer::new("t1", "A", "B", Decimal::from(10)).with_label("lunch"),
            Transfer::new("t2", "B", "C", Decimal::from(4)),
        ];
        let mut output = Vec::new();
        write_ledger_csv(&transfers, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "id,from,to,amount,label\nt1,A,B,10,lunch\nt2,B,C,4,\n"
        );
    }

    #[test]
    fn test_write_accounts_csv() {
        let accounts = vec!["Alice".to_string(), "Bob".to_string()];
        let mut output = Vec::new();
        write_accounts_csv(&accounts, &mut output).unwrap();

        assert_eq!(String::from_utf8(output).unwrap(), "account\nAlice\nBob\n");
    }

    #[test]
    fn test_write_reports_csv() {
        let report = Report {
            id: "r1".to_string(),
            label: "Monday 19 October 2026".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
            created_at: Utc.with_ymd_and_hms(2026, 10, 19, 8, 0, 0).unwrap(),
            transfers: vec![
                SettlementTransfer::new("A", "B", Decimal::from(100)),
                SettlementTransfer::new("A", "C", Decimal::from(200)),
            ],
        };
        let mut output = Vec::new();
        write_reports_csv(&[report], &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "report,date,label,created_at,from,to,amount\n\
             r1,2026-10-19,Monday 19 October 2026,2026-10-19T08:00:00+00:00,A,B,100\n\
             r1,2026-10-19,Monday 19 October 2026,2026-10-19T08:00:00+00:00,A,C,200\n"
        );
    }
}
