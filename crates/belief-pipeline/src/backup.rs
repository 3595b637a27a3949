//! Greedy one-step backup simulation over successor-expansion records
//!
//! Replays recorded expansions: of a parent's successors, the one minimizing
//! `transitionCost + E[h*]` is the one a one-step-lookahead agent would
//! commit to. Only the first moment of each successor's belief is consulted,
//! which keeps the replay a single streaming pass over very large logs.
//!
//! The comparison is strict, so ties keep the first successor encountered.
//! Encounter order is significant; callers must hand successors over in
//! their original generation order.

use std::collections::BTreeMap;

use crate::expectation::AverageTable;

/// One recorded expansion: a parent heuristic value and its successors in
/// generation order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessorRecord {
    pub parent_h: i64,
    pub successors: Vec<Successor>,
}

/// One successor edge: transition cost and the successor's heuristic value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Successor {
    pub cost: i64,
    pub h: i64,
}

/// Selections accumulated for a single parent heuristic value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentSelections {
    records: u64,
    by_successor: BTreeMap<i64, BTreeMap<i64, u64>>,
}

impl ParentSelections {
    /// Number of records that produced a selection for this parent
    pub fn records(&self) -> u64 {
        self.records
    }

    /// Iterate over `(successor h, transition cost, selection count)`
    pub fn iter(&self) -> impl Iterator<Item = (i64, i64, u64)> + '_ {
        self.by_successor.iter().flat_map(|(&h, costs)| {
            costs.iter().map(move |(&cost, &count)| (h, cost, count))
        })
    }
}

/// Per-parent counts of which `(successor h, transition cost)` the backup
/// rule selected.
///
/// Built incrementally, one record at a time; increments are independent
/// across records, so partial tables from sharded inputs merge by per-key
/// addition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTable {
    parents: BTreeMap<i64, ParentSelections>,
}

impl SelectionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the backup rule to one record.
    ///
    /// Successors without an entry in `averages` cannot be evaluated and are
    /// passed over. Returns `false` if no successor could be evaluated, in
    /// which case the record contributes nothing; sparse training data makes
    /// this common and it is never an error.
    pub fn observe(&mut self, record: &SuccessorRecord, averages: &AverageTable) -> bool {
        let mut best: Option<(f64, Successor)> = None;
        for &successor in &record.successors {
            let Some(average) = averages.get(successor.h) else {
                continue;
            };
            let f = successor.cost as f64 + average;
            // strict: ties keep the earliest successor
            if best.map_or(true, |(best_f, _)| f < best_f) {
                best = Some((f, successor));
            }
        }
        let Some((_, chosen)) = best else {
            return false;
        };
        let parent = self.parents.entry(record.parent_h).or_default();
        parent.records += 1;
        *parent
            .by_successor
            .entry(chosen.h)
            .or_default()
            .entry(chosen.cost)
            .or_insert(0) += 1;
        true
    }

    /// Iterate over `(parent h, selections)` in ascending parent order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &ParentSelections)> + '_ {
        self.parents.iter().map(|(&h, parent)| (h, parent))
    }

    /// Selections for one parent heuristic value, if any record selected
    pub fn get(&self, parent_h: i64) -> Option<&ParentSelections> {
        self.parents.get(&parent_h)
    }

    /// Number of parents with at least one selection
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Check whether no record produced a selection
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}
