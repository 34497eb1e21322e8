//! Transfer-related types for fluxcalc
//!
//! This module defines the raw transfer recorded between two accounts and the
//! derived transfer shape produced by the netting and aggregation passes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Account identifier
///
/// Opaque, case-sensitive token. Equality is exact string equality; any
/// normalization happens when an account is registered in the ledger.
pub type AccountId = String;

/// Transfer identifier
///
/// Opaque token. Freshly recorded transfers receive a UUID v4.
pub type TransferId = String;

/// A recorded money transfer between two accounts
///
/// Immutable once created. A well-formed transfer has `from != to`, both
/// account ids non-empty and a strictly positive amount. The ledger only
/// admits well-formed transfers; the engine skips anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transfer {
    /// Unique transfer identifier
    pub id: TransferId,

    /// Sending account
    pub from: AccountId,

    /// Receiving account
    pub to: AccountId,

    /// Amount moved, a positive whole number in practice
    pub amount: Decimal,

    /// Optional free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Transfer {
    /// Create a transfer without a label
    pub fn new(
        id: impl Into<TransferId>,
        from: impl Into<AccountId>,
        to: impl Into<AccountId>,
        amount: Decimal,
    ) -> Self {
        Transfer {
            id: id.into(),
            from: from.into(),
            to: to.into(),
            amount,
            label: None,
        }
    }

    /// Attach a label to this transfer
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether this transfer satisfies the engine's input preconditions
    pub fn is_well_formed(&self) -> bool {
        !self.from.is_empty()
            && !self.to.is_empty()
            && self.from != self.to
            && self.amount > Decimal::ZERO
    }
}

/// A derived transfer between an ordered pair of accounts
///
/// Output-only. Two entries with the same `(from, to)` pair never appear in
/// the same derived list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SettlementTransfer {
    /// Paying account
    pub from: AccountId,

    /// Receiving account
    pub to: AccountId,

    /// Amount, always positive
    pub amount: Decimal,
}

impl SettlementTransfer {
    pub fn new(from: impl Into<AccountId>, to: impl Into<AccountId>, amount: Decimal) -> Self {
        SettlementTransfer {
            from: from.into(),
            to: to.into(),
            amount,
        }
    }
}

/// Per-pair total of raw transfers, without netting against the reverse pair
pub type GroupedTransfer = SettlementTransfer;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::valid("A", "B", 100, true)]
    #[case::self_transfer("A", "A", 100, false)]
    #[case::zero_amount("A", "B", 0, false)]
    #[case::negative_amount("A", "B", -5, false)]
    #[case::empty_sender("", "B", 100, false)]
    #[case::empty_receiver("A", "", 100, false)]
    fn test_is_well_formed(
        #[case] from: &str,
        #[case] to: &str,
        #[case] amount: i64,
        #[case] expected: bool,
    ) {
        let transfer = Transfer::new("t1", from, to, Decimal::from(amount));
        assert_eq!(transfer.is_well_formed(), expected);
    }

    #[test]
    fn test_label_is_omitted_from_json_when_absent() {
        let transfer = Transfer::new("t1", "A", "B", Decimal::from(10));
        let json = serde_json::to_string(&transfer).unwrap();
        assert!(!json.contains("label"));

        let labelled = transfer.with_label("rent");
        let json = serde_json::to_string(&labelled).unwrap();
        assert!(json.contains("\"label\":\"rent\""));
    }
}
