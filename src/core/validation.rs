//! Boundary validation for user-supplied accounts and transfers
//!
//! Everything the netting engine assumes about its input is enforced here,
//! before a transfer can enter the ledger.

use crate::types::{LedgerError, Transfer, TransferId};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Raw transfer input as typed by the user
///
/// All fields are free text; `validate` turns a draft into a `Transfer`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferDraft {
    pub from: String,
    pub to: String,
    pub amount: String,
    pub label: String,
}

impl TransferDraft {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        amount: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        TransferDraft {
            from: from.into(),
            to: to.into(),
            amount: amount.into(),
            label: label.into(),
        }
    }

    /// Validate this draft and build a transfer with the given id
    ///
    /// # Errors
    ///
    /// - `MissingAccounts` if the sender or receiver is blank
    /// - `SelfTransfer` if sender and receiver are the same account
    /// - `InvalidAmount` if the amount is not a positive whole number
    pub fn validate(&self, id: impl Into<TransferId>) -> Result<Transfer, LedgerError> {
        let from = self.from.trim();
        let to = self.to.trim();

        if from.is_empty() || to.is_empty() {
            return Err(LedgerError::MissingAccounts);
        }

        if from == to {
            return Err(LedgerError::self_transfer(from));
        }

        let amount = parse_amount(&self.amount)?;

        let label = self.label.trim();
        let mut transfer = Transfer::new(id, from, to, amount);
        if !label.is_empty() {
            transfer = transfer.with_label(label);
        }

        Ok(transfer)
    }
}

/// Parse a positive whole amount, tolerating surrounding whitespace and a
/// zero fractional part (`"12.0"`)
pub fn parse_amount(input: &str) -> Result<Decimal, LedgerError> {
    let trimmed = input.trim();
    let amount =
        Decimal::from_str(trimmed).map_err(|_| LedgerError::invalid_amount(trimmed))?;

    if amount <= Decimal::ZERO || !amount.fract().is_zero() {
        return Err(LedgerError::invalid_amount(trimmed));
    }

    Ok(amount.normalize())
}

/// Check that an existing transfer satisfies the engine's input preconditions
pub fn check_well_formed(transfer: &Transfer) -> Result<(), LedgerError> {
    if transfer.from.is_empty() || transfer.to.is_empty() {
        return Err(LedgerError::MissingAccounts);
    }
    if transfer.from == transfer.to {
        return Err(LedgerError::self_transfer(&transfer.from));
    }
    if transfer.amount <= Decimal::ZERO {
        return Err(LedgerError::invalid_amount(&transfer.amount.to_string()));
    }
    Ok(())
}

/// Trim an account name, rejecting blank input
pub fn normalize_account_name(input: &str) -> Result<String, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::AccountNameRequired);
    }
    Ok(trimmed.to_string())
}
