//! Keyed sample histograms

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::{self, Write};

use crate::error::{Error, Result};
use crate::key::HistogramKey;

/// Sample counts observed under a single key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCounts {
    total: u64,
    outcomes: BTreeMap<i64, u64>,
}

impl KeyCounts {
    /// Total number of samples recorded for this key
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Iterate over `(outcome, count)` pairs in ascending outcome order
    pub fn outcomes(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.outcomes.iter().map(|(&outcome, &count)| (outcome, count))
    }

    /// Count recorded for one outcome (zero if never observed)
    pub fn outcome_count(&self, outcome: i64) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    fn outcome_sum(&self) -> u64 {
        self.outcomes.values().sum()
    }
}

/// A histogram of integer outcomes, bucketed per key.
///
/// Serves both raw h* distributions and post-expansion belief distributions;
/// the two differ only in what key and outcome mean. Keys are kept in sorted
/// order so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleHistogram<K: HistogramKey> {
    keys: BTreeMap<K, KeyCounts>,
}

impl<K: HistogramKey> SampleHistogram<K> {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    /// Record `count` samples of `outcome` under `key`, bumping the key total
    pub fn add_sample(&mut self, key: K, outcome: i64, count: u64) {
        let entry = self.keys.entry(key).or_default();
        entry.total += count;
        *entry.outcomes.entry(outcome).or_insert(0) += count;
    }

    /// Grow a key's total without touching its outcome counts.
    ///
    /// Used by readers of pre-aggregated files, which carry a declared total
    /// per line that must be accumulated verbatim. Pair with [`add_outcome`]
    /// and verify the result with [`check_conservation`].
    ///
    /// [`add_outcome`]: SampleHistogram::add_outcome
    /// [`check_conservation`]: SampleHistogram::check_conservation
    pub fn add_observed_total(&mut self, key: K, count: u64) {
        self.keys.entry(key).or_default().total += count;
    }

    /// Grow one outcome count without touching the key's total
    pub fn add_outcome(&mut self, key: K, outcome: i64, count: u64) {
        let entry = self.keys.entry(key).or_default();
        *entry.outcomes.entry(outcome).or_insert(0) += count;
    }

    /// Add every count of `other` into `self`.
    ///
    /// Per-key addition, so merging is commutative and associative: merging
    /// partial histograms built from sharded inputs yields the same result
    /// as one sequential build.
    pub fn merge(&mut self, other: &SampleHistogram<K>) {
        for (&key, counts) in &other.keys {
            let entry = self.keys.entry(key).or_default();
            entry.total += counts.total;
            for (&outcome, &count) in &counts.outcomes {
                *entry.outcomes.entry(outcome).or_insert(0) += count;
            }
        }
    }

    /// Counts recorded under `key`, if any
    pub fn get(&self, key: &K) -> Option<&KeyCounts> {
        self.keys.get(key)
    }

    /// Iterate over `(key, counts)` in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (K, &KeyCounts)> + '_ {
        self.keys.iter().map(|(&key, counts)| (key, counts))
    }

    /// Iterate over keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.keys.keys().copied()
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check whether the histogram has no keys
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Verify `total == Σ outcome counts` for every key.
    ///
    /// A violation means the store was fed inconsistent pre-aggregated data
    /// or there is an accumulation defect; either way the histogram must not
    /// be used further.
    pub fn check_conservation(&self) -> Result<()> {
        for (key, counts) in &self.keys {
            let sum = counts.outcome_sum();
            if counts.total != sum {
                let mut repr = String::new();
                key.format_into(&mut repr);
                return Err(Error::CountConservation {
                    key: repr,
                    total: counts.total,
                    sum,
                });
            }
        }
        Ok(())
    }

    /// Serialize as `key totalCount (outcome count)+` lines, keys ascending,
    /// outcomes ascending within each line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let mut line = String::new();
        for (key, counts) in &self.keys {
            line.clear();
            key.format_into(&mut line);
            let _ = write!(line, " {}", counts.total);
            for (&outcome, &count) in &counts.outcomes {
                let _ = write!(line, " {outcome} {count}");
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

impl<K: HistogramKey> Default for SampleHistogram<K> {
    fn default() -> Self {
        Self::new()
    }
}
