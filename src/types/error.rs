//! Error types for fluxcalc
//!
//! This module defines every error the ledger boundary can report. The netting
//! engine itself never fails; all validation happens before transfers reach it.
//!
//! # Error Categories
//!
//! - **Validation Errors**: missing or duplicate accounts, self transfers, bad amounts
//! - **Lookup Errors**: unknown transfer or report identifiers
//! - **Report Errors**: missing report date, nothing to archive
//! - **I/O Errors**: file access, CSV parsing, persisted state

use thiserror::Error;

/// Main error type for the ledger boundary
///
/// Each variant carries enough context to be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// Account name was empty after trimming
    #[error("Account name is required")]
    AccountNameRequired,

    /// An account with the same name (ignoring case) is already registered
    #[error("Account '{name}' already exists")]
    DuplicateAccount {
        /// The conflicting name as supplied
        name: String,
    },

    /// Transfer references an account that was never registered
    #[error("Unknown account '{name}'")]
    UnknownAccount {
        /// The unregistered account name
        name: String,
    },

    /// Sender or receiver was not supplied
    #[error("Select both a sending and a receiving account")]
    MissingAccounts,

    /// Sender and receiver are the same account
    #[error("Sending account '{account}' must differ from the receiving account")]
    SelfTransfer {
        /// The account used on both sides
        account: String,
    },

    /// Amount is not a positive whole number
    #[error("Invalid amount '{amount}'")]
    InvalidAmount {
        /// The rejected amount text
        amount: String,
    },

    /// No transfer with the given id
    #[error("Transfer {id} not found")]
    TransferNotFound {
        /// The id that was looked up
        id: String,
    },

    /// A transfer with the same id is already recorded
    #[error("Transfer {id} already exists")]
    DuplicateTransfer {
        /// The repeated id
        id: String,
    },

    /// A summary was validated without a date
    #[error("Select a date to validate the summary")]
    MissingReportDate,

    /// A summary was validated while the settlement plan is empty
    #[error("No flows to validate for {date}")]
    NoFlowsToValidate {
        /// The requested report date
        date: String,
    },

    /// No report with the given id
    #[error("Report {id} not found")]
    ReportNotFound {
        /// The id that was looked up
        id: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Persisted ledger state could not be encoded or decoded
    #[error("Invalid ledger state: {message}")]
    StateError {
        /// Description of the serialization failure
        message: String,
    },

    /// Persisted ledger state was written by an incompatible version
    #[error("Unsupported ledger state version {found} (expected {expected})")]
    StateVersion {
        /// Version found in the state file
        found: u32,
        /// Version this build reads and writes
        expected: u32,
    },
}

impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::StateError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a DuplicateAccount error
    pub fn duplicate_account(name: &str) -> Self {
        LedgerError::DuplicateAccount {
            name: name.to_string(),
        }
    }

    /// Create an UnknownAccount error
    pub fn unknown_account(name: &str) -> Self {
        LedgerError::UnknownAccount {
            name: name.to_string(),
        }
    }

    /// Create a SelfTransfer error
    pub fn self_transfer(account: &str) -> Self {
        LedgerError::SelfTransfer {
            account: account.to_string(),
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: &str) -> Self {
        LedgerError::InvalidAmount {
            amount: amount.to_string(),
        }
    }

    /// Create a TransferNotFound error
    pub fn transfer_not_found(id: &str) -> Self {
        LedgerError::TransferNotFound { id: id.to_string() }
    }

    /// Create a DuplicateTransfer error
    pub fn duplicate_transfer(id: &str) -> Self {
        LedgerError::DuplicateTransfer { id: id.to_string() }
    }

    /// Create a ReportNotFound error
    pub fn report_not_found(id: &str) -> Self {
        LedgerError::ReportNotFound { id: id.to_string() }
    }

    /// Create a NoFlowsToValidate error
    pub fn no_flows_to_validate(date: impl ToString) -> Self {
        LedgerError::NoFlowsToValidate {
            date: date.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::account_name_required(LedgerError::AccountNameRequired, "Account name is required")]
    #[case::duplicate_account(
        LedgerError::DuplicateAccount { name: "alice".to_string() },
        "Account 'alice' already exists"
    )]
    #[case::self_transfer(
        LedgerError::SelfTransfer { account: "Alice".to_string() },
        "Sending account 'Alice' must differ from the receiving account"
    )]
    #[case::invalid_amount(
        LedgerError::InvalidAmount { amount: "12.5".to_string() },
        "Invalid amount '12.5'"
    )]
    #[case::parse_error_with_line(
        LedgerError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        LedgerError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::duplicate_transfer(
        LedgerError::DuplicateTransfer { id: "t1".to_string() },
        "Transfer t1 already exists"
    )]
    #[case::no_flows(
        LedgerError::NoFlowsToValidate { date: "2026-10-19".to_string() },
        "No flows to validate for 2026-10-19"
    )]
    #[case::state_version(
        LedgerError::StateVersion { found: 7, expected: 1 },
        "Unsupported ledger state version 7 (expected 1)"
    )]
    fn test_error_display(#[case] error: LedgerError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::duplicate_account(
        LedgerError::duplicate_account("Bob"),
        LedgerError::DuplicateAccount { name: "Bob".to_string() }
    )]
    #[case::transfer_not_found(
        LedgerError::transfer_not_found("abc"),
        LedgerError::TransferNotFound { id: "abc".to_string() }
    )]
    #[case::duplicate_transfer(
        LedgerError::duplicate_transfer("t1"),
        LedgerError::DuplicateTransfer { id: "t1".to_string() }
    )]
    #[case::report_not_found(
        LedgerError::report_not_found("r1"),
        LedgerError::ReportNotFound { id: "r1".to_string() }
    )]
    fn test_helper_functions(#[case] result: LedgerError, #[case] expected: LedgerError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: LedgerError = io_error.into();
        assert!(matches!(error, LedgerError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: LedgerError = json_error.into();
        assert!(matches!(error, LedgerError::StateError { .. }));
    }
}
