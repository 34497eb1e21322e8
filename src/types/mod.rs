//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transfer`: Raw and derived transfer types and identifiers
//! - `report`: Archived settlement reports
//! - `error`: Error types for the ledger boundary

pub mod error;
pub mod report;
pub mod transfer;

pub use error::LedgerError;
pub use report::{Report, ReportId};
pub use transfer::{AccountId, GroupedTransfer, SettlementTransfer, Transfer, TransferId};
