//! Insertion-ordered running totals
//!
//! Both engine passes iterate their accumulators in the order keys were first
//! seen, so a plain hash map is not enough. `OrderedTotals` pairs a hash index
//! with a vector of entries kept in first-insertion order.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::hash::Hash;

/// Signed running totals keyed by `K`, iterated in first-insertion order
#[derive(Debug, Clone)]
pub struct OrderedTotals<K> {
    /// Position of each key in `entries`
    index: HashMap<K, usize>,
    /// Keys and totals in the order keys were first added
    entries: Vec<(K, Decimal)>,
}

impl<K: Hash + Eq + Copy> OrderedTotals<K> {
    pub fn new() -> Self {
        OrderedTotals {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Add `delta` to the total for `key`, inserting it at zero on first use
    pub fn add(&mut self, key: K, delta: Decimal) {
        match self.index.get(&key) {
            Some(&position) => {
                let total = &mut self.entries[position].1;
                *total = total.saturating_add(delta);
            }
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push((key, delta));
            }
        }
    }

    /// Current total for `key`, if it has been seen
    pub fn get(&self, key: &K) -> Option<Decimal> {
        self.index.get(key).map(|&position| self.entries[position].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate keys and totals in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (K, Decimal)> + '_ {
        self.entries.iter().copied()
    }
}

impl<K: Hash + Eq + Copy> Default for OrderedTotals<K> {
    fn default() -> Self {
        Self::new()
    }
}
