//! Property-based tests for netting invariants
//!
//! These tests use proptest to verify:
//! - Balance conservation: the settlement plan reproduces every net balance
//! - Pair uniqueness: both views emit each ordered pair at most once
//! - Size bound: a plan never needs more than debtors + creditors - 1 transfers
//! - Grouping totals: per-pair sums add up to the raw total
//! - Determinism: same transfers → same output, cached or not

use fluxcalc::core::SettlementCache;
use fluxcalc::{aggregate_pairs, net_balances, SettlementTransfer, Transfer};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

const ACCOUNTS: usize = 6;

/// Strategy for generating whole positive amounts
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000).prop_map(Decimal::from)
}

/// Strategy for generating well-formed transfers over a small account pool
fn transfer_strategy() -> impl Strategy<Value = (usize, usize, Decimal)> {
    (0..ACCOUNTS, 1..ACCOUNTS, amount_strategy())
        .prop_map(|(from, offset, amount)| (from, (from + offset) % ACCOUNTS, amount))
}

fn transfers_strategy() -> impl Strategy<Value = Vec<Transfer>> {
    prop::collection::vec(transfer_strategy(), 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (from, to, amount))| {
                Transfer::new(i.to_string(), format!("acct-{}", from), format!("acct-{}", to), amount)
            })
            .collect()
    })
}

fn balances_of<'a>(
    flows: impl IntoIterator<Item = (&'a str, &'a str, Decimal)>,
) -> HashMap<&'a str, Decimal> {
    let mut balances = HashMap::new();
    for (from, to, amount) in flows {
        *balances.entry(from).or_insert(Decimal::ZERO) -= amount;
        *balances.entry(to).or_insert(Decimal::ZERO) += amount;
    }
    balances.retain(|_, balance| !balance.is_zero());
    balances
}

fn raw_flows(transfers: &[Transfer]) -> impl Iterator<Item = (&str, &str, Decimal)> {
    transfers
        .iter()
        .map(|t| (t.from.as_str(), t.to.as_str(), t.amount))
}

fn derived_flows(derived: &[SettlementTransfer]) -> impl Iterator<Item = (&str, &str, Decimal)> {
    derived
        .iter()
        .map(|t| (t.from.as_str(), t.to.as_str(), t.amount))
}

fn assert_unique_pairs(derived: &[SettlementTransfer]) -> Result<(), TestCaseError> {
    let mut seen = HashSet::new();
    for transfer in derived {
        prop_assert!(transfer.from != transfer.to, "self pair {:?}", transfer);
        prop_assert!(transfer.amount > Decimal::ZERO, "non-positive {:?}", transfer);
        prop_assert!(
            seen.insert((transfer.from.as_str(), transfer.to.as_str())),
            "duplicate pair {:?}",
            transfer
        );
    }
    Ok(())
}

proptest! {
    #[test]
    fn prop_settlement_conserves_balances(transfers in transfers_strategy()) {
        let plan = net_balances(&transfers);
        prop_assert_eq!(balances_of(derived_flows(&plan)), balances_of(raw_flows(&transfers)));
    }

    #[test]
    fn prop_settlement_pairs_are_unique(transfers in transfers_strategy()) {
        assert_unique_pairs(&net_balances(&transfers))?;
    }

    #[test]
    fn prop_settlement_size_bound(transfers in transfers_strategy()) {
        let balances = balances_of(raw_flows(&transfers));
        let debtors = balances.values().filter(|b| b.is_sign_negative()).count();
        let creditors = balances.len() - debtors;
        let plan = net_balances(&transfers);

        if balances.is_empty() {
            prop_assert!(plan.is_empty());
        } else {
            prop_assert!(plan.len() < debtors + creditors);
        }
    }

    #[test]
    fn prop_settlement_moves_no_more_than_raw_total(transfers in transfers_strategy()) {
        let moved: Decimal = net_balances(&transfers).iter().map(|t| t.amount).sum();
        let raw: Decimal = transfers.iter().map(|t| t.amount).sum();
        prop_assert!(moved <= raw);
    }

    #[test]
    fn prop_grouped_totals_match(transfers in transfers_strategy()) {
        let grouped = aggregate_pairs(&transfers);
        assert_unique_pairs(&grouped)?;

        for pair in &grouped {
            let expected: Decimal = transfers
                .iter()
                .filter(|t| t.from == pair.from && t.to == pair.to)
                .map(|t| t.amount)
                .sum();
            prop_assert_eq!(pair.amount, expected);
        }

        let distinct: HashSet<_> = transfers.iter().map(|t| (&t.from, &t.to)).collect();
        prop_assert_eq!(grouped.len(), distinct.len());
    }

    #[test]
    fn prop_views_are_deterministic(transfers in transfers_strategy()) {
        let cache = SettlementCache::new();
        prop_assert_eq!(net_balances(&transfers), net_balances(&transfers));
        prop_assert_eq!(&*cache.settlement(&transfers), &net_balances(&transfers));
        prop_assert_eq!(&*cache.grouped(&transfers), &aggregate_pairs(&transfers));
    }
}
