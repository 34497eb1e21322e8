//! Account and transfer registry
//!
//! The `Ledger` owns the session's source of truth: registered accounts, the
//! ordered list of recorded transfers and the report archive. Grouped totals
//! and the settlement plan are derived from the current transfer list on every
//! read and are never stored as authoritative state.
//!
//! Every mutation is validated here before it can reach the netting engine,
//! and emits a usage event under the `fluxcalc::usage` tracing target.

use crate::core::cache::SettlementCache;
use crate::core::report_archive::ReportArchive;
use crate::core::validation::{check_well_formed, normalize_account_name, TransferDraft};
use crate::types::{
    AccountId, GroupedTransfer, LedgerError, Report, SettlementTransfer, Transfer,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Layout version of `LedgerState`
pub const STATE_VERSION: u32 = 1;

const USAGE: &str = "fluxcalc::usage";

/// Serializable snapshot of a ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub version: u32,
    pub accounts: Vec<AccountId>,
    pub transfers: Vec<Transfer>,
    pub reports: Vec<Report>,
}

impl Default for LedgerState {
    fn default() -> Self {
        LedgerState {
            version: STATE_VERSION,
            accounts: Vec::new(),
            transfers: Vec::new(),
            reports: Vec::new(),
        }
    }
}

/// Session registry of accounts, transfers and archived reports
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Vec<AccountId>,
    transfers: Vec<Transfer>,
    reports: ReportArchive,
    views: SettlementCache,
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a ledger from a persisted snapshot
    pub fn from_state(state: LedgerState) -> Self {
        Ledger {
            accounts: state.accounts,
            transfers: state.transfers,
            reports: ReportArchive::from_reports(state.reports),
            views: SettlementCache::new(),
        }
    }

    /// Snapshot this ledger for persistence
    pub fn to_state(&self) -> LedgerState {
        LedgerState {
            version: STATE_VERSION,
            accounts: self.accounts.clone(),
            transfers: self.transfers.clone(),
            reports: self.reports.as_slice().to_vec(),
        }
    }

    pub fn accounts(&self) -> &[AccountId] {
        &self.accounts
    }

    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    pub fn reports(&self) -> &[Report] {
        self.reports.as_slice()
    }

    /// Register a new account
    ///
    /// The name is trimmed. Names are compared ignoring case, so `alice`
    /// cannot be added next to `Alice`.
    ///
    /// # Errors
    ///
    /// - `AccountNameRequired` if the name is blank
    /// - `DuplicateAccount` if an account with the same name exists
    pub fn add_account(&mut self, input: &str) -> Result<&AccountId, LedgerError> {
        let name = normalize_account_name(input)?;

        if self.find_account_ignoring_case(&name).is_some() {
            return Err(LedgerError::duplicate_account(&name));
        }

        info!(
            target: USAGE,
            event = "account_added",
            account = %name,
            total_accounts = self.accounts.len() + 1
        );
        self.accounts.push(name);
        Ok(&self.accounts[self.accounts.len() - 1])
    }

    /// Register `name` unless it is already registered with the exact same spelling
    ///
    /// # Errors
    ///
    /// - `AccountNameRequired` if the name is blank
    /// - `DuplicateAccount` if the name matches an account only when ignoring case
    pub fn ensure_account(&mut self, name: &str) -> Result<(), LedgerError> {
        match self.find_account_ignoring_case(name) {
            Some(existing) if existing == name => Ok(()),
            Some(_) => Err(LedgerError::duplicate_account(name)),
            None => self.add_account(name).map(|_| ()),
        }
    }

    /// Validate a draft and record it as a new transfer
    ///
    /// Both accounts must already be registered. The transfer receives a
    /// fresh UUID.
    pub fn add_transfer(&mut self, draft: &TransferDraft) -> Result<&Transfer, LedgerError> {
        let transfer = draft.validate(Uuid::new_v4().to_string())?;

        for name in [&transfer.from, &transfer.to] {
            if !self.accounts.iter().any(|account| account == name) {
                return Err(LedgerError::unknown_account(name));
            }
        }

        self.push_transfer(transfer)
    }

    /// Record an already-validated transfer, registering its accounts as needed
    ///
    /// Imported ids are kept as supplied, so an id already in the ledger is
    /// rejected with `DuplicateTransfer`.
    pub fn import_transfer(&mut self, transfer: Transfer) -> Result<&Transfer, LedgerError> {
        check_well_formed(&transfer)?;
        if self.transfers.iter().any(|existing| existing.id == transfer.id) {
            return Err(LedgerError::duplicate_transfer(&transfer.id));
        }
        // Reject case conflicts before registering either side
        for name in [&transfer.from, &transfer.to] {
            if let Some(existing) = self.find_account_ignoring_case(name) {
                if existing != name {
                    return Err(LedgerError::duplicate_account(name));
                }
            }
        }
        self.ensure_account(&transfer.from)?;
        self.ensure_account(&transfer.to)?;
        self.push_transfer(transfer)
    }

    fn push_transfer(&mut self, transfer: Transfer) -> Result<&Transfer, LedgerError> {
        info!(
            target: USAGE,
            event = "transfer_added",
            from = %transfer.from,
            to = %transfer.to,
            amount = %transfer.amount,
            has_label = transfer.label.is_some(),
            total_transfers = self.transfers.len() + 1
        );
        self.transfers.push(transfer);
        Ok(&self.transfers[self.transfers.len() - 1])
    }

    /// Remove the transfer with the given id
    pub fn remove_transfer(&mut self, id: &str) -> Result<Transfer, LedgerError> {
        let position = self
            .transfers
            .iter()
            .position(|transfer| transfer.id == id)
            .ok_or_else(|| LedgerError::transfer_not_found(id))?;
        let removed = self.transfers.remove(position);

        info!(
            target: USAGE,
            event = "transfer_removed",
            transfer_id = %removed.id,
            from = %removed.from,
            to = %removed.to,
            amount = %removed.amount,
            remaining_transfers = self.transfers.len()
        );
        Ok(removed)
    }

    /// Per-pair totals of the current transfers
    pub fn grouped_transfers(&self) -> Arc<Vec<GroupedTransfer>> {
        self.views.grouped(&self.transfers)
    }

    /// Settlement plan for the current transfers
    pub fn settlement(&self) -> Arc<Vec<SettlementTransfer>> {
        self.views.settlement(&self.transfers)
    }

    /// Archive the current settlement plan under `date`
    ///
    /// # Errors
    ///
    /// - `MissingReportDate` if no date is given
    /// - `NoFlowsToValidate` if the settlement plan is empty
    pub fn validate_summary(
        &mut self,
        date: Option<NaiveDate>,
        now: DateTime<Utc>,
    ) -> Result<&Report, LedgerError> {
        let date = date.ok_or(LedgerError::MissingReportDate)?;
        let plan = self.settlement();
        if plan.is_empty() {
            return Err(LedgerError::no_flows_to_validate(date));
        }

        info!(
            target: USAGE,
            event = "summary_validated",
            report_date = %date,
            transfers_count = plan.len(),
            total_reports = self.reports.len() + 1
        );
        Ok(self.reports.archive(date, &plan, now))
    }

    /// Remove the archived report with the given id
    pub fn remove_report(&mut self, id: &str) -> Result<Report, LedgerError> {
        let removed = self.reports.remove(id)?;
        info!(
            target: USAGE,
            event = "report_removed",
            report_id = %removed.id,
            report_date = %removed.date,
            transfers_count = removed.transfers.len(),
            remaining_reports = self.reports.len()
        );
        Ok(removed)
    }

    /// Clear all accounts and transfers
    ///
    /// Archived reports are kept.
    pub fn reset(&mut self) {
        info!(
            target: USAGE,
            event = "ledger_reset",
            accounts_count = self.accounts.len(),
            transfers_count = self.transfers.len(),
            reports_count = self.reports.len()
        );
        self.accounts.clear();
        self.transfers.clear();
        self.views.clear();
    }

    fn find_account_ignoring_case(&self, name: &str) -> Option<&AccountId> {
        let lowered = name.to_lowercase();
        self.accounts
            .iter()
            .find(|account| account.to_lowercase() == lowered)
    }
}
