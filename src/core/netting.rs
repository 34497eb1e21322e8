//! Balance netting engine
//!
//! Turns an ordered list of raw transfers into a settlement plan: a set of
//! directed transfers that reproduces every account's net balance.
//!
//! # Algorithm
//!
//! 1. **Balance accumulation**: each transfer debits its sender and credits its
//!    receiver. Accounts are tracked in the order they are first referenced.
//! 2. **Partition**: accounts below `-SETTLED_TOLERANCE` become debtors, those
//!    above `+SETTLED_TOLERANCE` become creditors, the rest are settled.
//! 3. **Greedy matching**: two pointers walk debtors and creditors in
//!    first-referenced order, each step settling the smaller remaining amount.
//! 4. **Aggregation**: emitted transfers are summed per ordered pair, in
//!    first-emission order.
//!
//! Lists are never sorted by magnitude. The output is therefore not always the
//! smallest possible number of transfers, but it is fully determined by the
//! input order.

use crate::core::ordered::OrderedTotals;
use crate::types::{SettlementTransfer, Transfer};
use rust_decimal::Decimal;

/// Magnitude at or below which a balance or remaining amount counts as zero (0.0001)
pub const SETTLED_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 4);

/// An account with an outstanding amount still to pay or receive
#[derive(Debug)]
struct OpenPosition<'a> {
    account: &'a str,
    remaining: Decimal,
}

/// Compute each account's signed net balance, in first-referenced order
///
/// Senders are decreased and receivers increased by each transfer's amount.
/// Transfers that are not well-formed are skipped.
pub fn accumulate_balances(transfers: &[Transfer]) -> OrderedTotals<&str> {
    let mut balances = OrderedTotals::new();
    for transfer in transfers.iter().filter(|t| t.is_well_formed()) {
        balances.add(transfer.from.as_str(), -transfer.amount);
        balances.add(transfer.to.as_str(), transfer.amount);
    }
    balances
}

/// Compute the settlement plan for a transfer snapshot
///
/// Returns at most one transfer per ordered `(from, to)` pair. Empty input, or
/// input whose balances all fall within `SETTLED_TOLERANCE`, yields an empty plan.
pub fn net_balances(transfers: &[Transfer]) -> Vec<SettlementTransfer> {
    let balances = accumulate_balances(transfers);

    let mut debtors = Vec::new();
    let mut creditors = Vec::new();
    for (account, balance) in balances.iter() {
        if balance < -SETTLED_TOLERANCE {
            debtors.push(OpenPosition {
                account,
                remaining: -balance,
            });
        } else if balance > SETTLED_TOLERANCE {
            creditors.push(OpenPosition {
                account,
                remaining: balance,
            });
        }
    }

    let mut settled_pairs = OrderedTotals::new();
    let mut i = 0;
    let mut j = 0;

    while i < debtors.len() && j < creditors.len() {
        let settled = debtors[i].remaining.min(creditors[j].remaining);

        if settled > Decimal::ZERO {
            settled_pairs.add((debtors[i].account, creditors[j].account), settled);
        }

        debtors[i].remaining = debtors[i].remaining.saturating_sub(settled);
        creditors[j].remaining = creditors[j].remaining.saturating_sub(settled);

        if debtors[i].remaining <= SETTLED_TOLERANCE {
            i += 1;
        }
        if creditors[j].remaining <= SETTLED_TOLERANCE {
            j += 1;
        }
    }

    settled_pairs
        .iter()
        .map(|((from, to), amount)| SettlementTransfer::new(from, to, amount))
        .collect()
}
