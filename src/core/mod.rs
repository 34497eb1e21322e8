//! Core business logic module
//!
//! This module contains the netting engine and the ledger around it:
//! - `netting` - Net balance computation and greedy settlement matching
//! - `aggregator` - Per-pair totals without reverse-pair cancellation
//! - `ordered` - Insertion-ordered accumulator shared by both passes
//! - `cache` - Memoized views keyed by transfer snapshot
//! - `validation` - Boundary checks for accounts and transfers
//! - `ledger` - Account/transfer registry and session state
//! - `report_archive` - Frozen settlement reports
//! - `traits` - Trait abstraction for persisting ledger state

pub mod aggregator;
pub mod cache;
pub mod ledger;
pub mod netting;
pub mod ordered;
pub mod report_archive;
pub mod traits;
pub mod validation;

pub use aggregator::aggregate_pairs;
pub use cache::SettlementCache;
pub use ledger::{Ledger, LedgerState, STATE_VERSION};
pub use netting::{net_balances, SETTLED_TOLERANCE};
pub use report_archive::ReportArchive;
pub use traits::StateStore;
pub use validation::TransferDraft;
