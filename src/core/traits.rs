//! Core traits for ledger persistence
//!
//! This module defines the trait abstraction that lets the ledger be stored
//! in a JSON file or kept in memory interchangeably.

use crate::core::ledger::LedgerState;
use crate::types::LedgerError;

/// Trait for loading and saving ledger state between sessions
///
/// Implementations must return an empty, current-version state when nothing
/// has been saved yet.
pub trait StateStore {
    /// Load the last saved state
    fn load(&self) -> Result<LedgerState, LedgerError>;

    /// Replace the saved state
    fn save(&self, state: &LedgerState) -> Result<(), LedgerError>;
}
