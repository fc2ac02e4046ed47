//! The numeric state store: prime-keyed growable rows of cells.

use riv_types::{PrimeTable, RivError, RivResult};
use std::collections::BTreeMap;

/// Program state: one growable list per prime key.
///
/// Lists grow lazily — a write landing exactly one past the populated end
/// appends a zero first. Snapshots are deep value copies so a rolled-back
/// block can never leak a mutation into its parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateStore {
    lists: BTreeMap<u64, Vec<f64>>,
}

impl StateStore {
    /// An empty store keyed by the first `rows` primes.
    pub fn new(primes: &mut PrimeTable, rows: usize) -> Self {
        let mut lists = BTreeMap::new();
        for i in 0..rows {
            lists.insert(primes.get(i), Vec::new());
        }
        Self { lists }
    }

    /// Deep copy of the whole store.
    pub fn snapshot(&self) -> StateStore {
        self.clone()
    }

    /// Replace the store with a snapshot.
    pub fn restore(&mut self, snapshot: StateStore) {
        *self = snapshot;
    }

    /// Read a cell. Cells beyond the populated prefix read as zero.
    pub fn cell(&self, list_id: u64, idx: usize) -> f64 {
        self.lists
            .get(&list_id)
            .and_then(|list| list.get(idx))
            .copied()
            .unwrap_or(0.0)
    }

    /// The populated cells of a list.
    pub fn list(&self, list_id: u64) -> &[f64] {
        self.lists
            .get(&list_id)
            .map(|list| list.as_slice())
            .unwrap_or(&[])
    }

    /// Mutable access to a whole list.
    pub fn list_mut(&mut self, list_id: u64) -> &mut Vec<f64> {
        self.lists.entry(list_id).or_default()
    }

    /// Mutable access to a cell, appending a zero when the write lands just
    /// past the populated end. Organized tokens grow cells monotonically,
    /// so anything further out is an engine defect.
    pub fn cell_mut(&mut self, list_id: u64, idx: usize) -> RivResult<&mut f64> {
        let list = self.lists.entry(list_id).or_default();
        if idx == list.len() {
            list.push(0.0);
        }
        list.get_mut(idx).ok_or_else(|| {
            RivError::internal(format!(
                "write to cell {idx} of list {list_id} beyond its populated length"
            ))
        })
    }
}
