//! Pairwise aggregation of raw transfers
//!
//! Collapses the transfer list into one total per ordered `(from, to)` pair.
//! Opposite-direction flows are reported separately, never cancelled.

use crate::core::ordered::OrderedTotals;
use crate::types::{GroupedTransfer, Transfer};

/// Sum transfer amounts per ordered `(from, to)` pair
///
/// Each pair appears once, positioned where the pair first occurs in
/// `transfers`. Transfers that are not well-formed are skipped.
pub fn aggregate_pairs(transfers: &[Transfer]) -> Vec<GroupedTransfer> {
    let mut totals = OrderedTotals::new();
    for transfer in transfers.iter().filter(|t| t.is_well_formed()) {
        totals.add((transfer.from.as_str(), transfer.to.as_str()), transfer.amount);
    }

    totals
        .iter()
        .map(|((from, to), amount)| GroupedTransfer::new(from, to, amount))
        .collect()
}
