//! Fluxcalc Library
//! # Overview
//!
//! This library records transfers between named accounts and derives two views
//! from them: per-pair totals and a settlement plan that reproduces every
//! account's net balance with as few transfers as the greedy matcher finds.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transfer, SettlementTransfer, Report, LedgerError)
//! - [`cli`] - CLI arguments parsing and command dispatch
//! - [`core`] - Business logic components:
//!   - [`core::netting`] - Net balance computation and settlement matching
//!   - [`core::aggregator`] - Per-pair totals
//!   - [`core::ledger`] - Accounts, transfers and archived reports
//!   - [`core::cache`] - Memoized derived views
//! - [`io`] - CSV reading and writing, ledger state persistence
//! - [`strategy`] - Sync and async CSV pipelines
//!
//! # Derived Views
//!
//! - **Grouped**: one row per ordered `(from, to)` pair, reverse flows kept apart
//! - **Settlement**: debtors paired with creditors in first-referenced order
//!
//! Both views are pure functions of the ordered transfer list.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use crate::core::{aggregate_pairs, net_balances, Ledger, SettlementCache, TransferDraft};
pub use crate::io::{write_transfers_csv, JsonFileStore};
pub use crate::types::{
    AccountId, GroupedTransfer, LedgerError, Report, SettlementTransfer, Transfer, TransferId,
};
