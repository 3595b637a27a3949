//! Sample-weighted expected-outcome tables

use std::collections::BTreeMap;

use belief_histogram::SampleHistogram;

use crate::error::{Error, Result};

/// Count-weighted mean h* per heuristic value.
///
/// Acts as the first-moment summary of the h* distribution; the backup rule
/// uses it as the expected remaining cost of a successor. Keys with no
/// samples carry no entry, and a missing key means "no belief available".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AverageTable {
    averages: BTreeMap<i64, f64>,
}

impl AverageTable {
    /// Derive the table from a merged h* distribution.
    ///
    /// Each key's average weights outcomes by their sample counts. An
    /// outcome count exceeding its key's total is a bookkeeping defect, not
    /// bad user input, and fails the whole derivation.
    pub fn from_histogram(histogram: &SampleHistogram<i64>) -> Result<Self> {
        let mut averages = BTreeMap::new();
        for (h, counts) in histogram.iter() {
            let total = counts.total();
            if total == 0 {
                continue;
            }
            let mut weighted = 0.0;
            for (outcome, count) in counts.outcomes() {
                if count > total {
                    return Err(Error::Consistency(format!(
                        "outcome {outcome} under key {h} has {count} samples, \
                         exceeding the key total {total}"
                    )));
                }
                weighted += outcome as f64 * (count as f64 / total as f64);
            }
            averages.insert(h, weighted);
        }
        Ok(Self { averages })
    }

    /// Expected h* for `h`, if any samples were collected for it
    pub fn get(&self, h: i64) -> Option<f64> {
        self.averages.get(&h).copied()
    }

    /// Iterate over `(h, average)` in ascending h order
    pub fn iter(&self) -> impl Iterator<Item = (i64, f64)> + '_ {
        self.averages.iter().map(|(&h, &average)| (h, average))
    }

    /// Number of keys with a defined average
    pub fn len(&self) -> usize {
        self.averages.len()
    }

    /// Check whether no key has a defined average
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weighted_average() {
        let mut hist = SampleHistogram::new();
        hist.add_sample(5i64, 2, 3);
        hist.add_sample(5i64, 4, 1);

        let averages = AverageTable::from_histogram(&hist).unwrap();
        // (2*3 + 4*1) / 4
        assert_relative_eq!(averages.get(5).unwrap(), 2.5);
    }

    #[test]
    fn test_missing_key_has_no_belief() {
        let mut hist = SampleHistogram::new();
        hist.add_sample(1i64, 1, 1);

        let averages = AverageTable::from_histogram(&hist).unwrap();
        assert!(averages.get(2).is_none());
    }

    #[test]
    fn test_zero_total_key_excluded() {
        let mut hist = SampleHistogram::new();
        hist.add_sample(1i64, 1, 1);
        hist.add_observed_total(9i64, 0);

        let averages = AverageTable::from_histogram(&hist).unwrap();
        assert_eq!(averages.len(), 1);
        assert!(averages.get(9).is_none());
    }

    #[test]
    fn test_count_exceeding_total_is_fatal() {
        let mut hist = SampleHistogram::new();
        hist.add_observed_total(5i64, 2);
        hist.add_outcome(5i64, 3, 4);

        let err = AverageTable::from_histogram(&hist).unwrap_err();
        assert!(matches!(err, Error::Consistency(_)));
    }

    #[test]
    fn test_negative_outcomes_weighted() {
        let mut hist = SampleHistogram::new();
        hist.add_sample(0i64, -2, 1);
        hist.add_sample(0i64, 2, 3);

        let averages = AverageTable::from_histogram(&hist).unwrap();
        assert_relative_eq!(averages.get(0).unwrap(), 1.0);
    }
}
