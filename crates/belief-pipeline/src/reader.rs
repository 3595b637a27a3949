//! Line-oriented readers for belief training data
//!
//! Every format is whitespace-separated signed integers, one record per
//! line. The collectors producing these files are noisy, so lines that do
//! not parse as integers (or, for the merged-distribution format, have an
//! impossible token count) are tolerated and skipped. Impossible *values* on
//! otherwise well-formed lines indicate a corrupt upstream aggregation and
//! abort the run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use belief_histogram::{HistogramKey, SampleHistogram};

use crate::backup::{Successor, SuccessorRecord};
use crate::error::{Error, Result};

/// Parse a line into integer tokens; `None` if any token is not an integer
fn parse_tokens(line: &str) -> Option<Vec<i64>> {
    line.split_whitespace().map(|token| token.parse().ok()).collect()
}

/// Merge one pre-aggregated distribution stream into `histogram`.
///
/// Line format: `key totalSamples (outcome count)+`, where the key occupies
/// [`HistogramKey::TOKENS`] leading tokens. The declared total is
/// accumulated verbatim; verify the merged result with
/// [`SampleHistogram::check_conservation`] once all inputs are in.
pub fn read_distribution<K, R>(
    input: R,
    origin: &str,
    histogram: &mut SampleHistogram<K>,
) -> Result<()>
where
    K: HistogramKey,
    R: BufRead,
{
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let Some(values) = parse_tokens(&line) else {
            log::debug!("{origin}:{line_no}: non-integer token, line skipped");
            continue;
        };
        if values.is_empty() {
            continue;
        }
        if values.len() < K::TOKENS + 3 || (values.len() - K::TOKENS - 1) % 2 != 0 {
            log::debug!(
                "{origin}:{line_no}: bad token count {}, line skipped",
                values.len()
            );
            continue;
        }
        let key = K::from_tokens(&values[..K::TOKENS]);
        let total = values[K::TOKENS];
        if total <= 0 {
            return Err(Error::Format {
                origin: origin.to_string(),
                line: line_no,
                reason: format!("total sample count {total} must be positive"),
            });
        }
        histogram.add_observed_total(key, total as u64);
        for pair in values[K::TOKENS + 1..].chunks_exact(2) {
            let (outcome, count) = (pair[0], pair[1]);
            if count < 0 {
                return Err(Error::Format {
                    origin: origin.to_string(),
                    line: line_no,
                    reason: format!("negative sample count {count} for outcome {outcome}"),
                });
            }
            histogram.add_outcome(key, outcome, count as u64);
        }
    }
    Ok(())
}

/// Merge one pre-aggregated distribution file into `histogram`
pub fn read_distribution_file<K: HistogramKey>(
    path: &Path,
    histogram: &mut SampleHistogram<K>,
) -> Result<()> {
    let input = BufReader::new(File::open(path)?);
    read_distribution(input, &path.display().to_string(), histogram)
}

/// Stream successor-expansion records to `consume`, one line at a time.
///
/// Line format: `parentH (transitionCost successorH)+`, an odd token count
/// of at least 3. Successor order within a record is significant (the backup
/// tie-break keeps the first minimum) and is preserved exactly. Records are
/// handed off as they are decoded; none are retained here.
pub fn stream_successors<R, F>(input: R, origin: &str, mut consume: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(SuccessorRecord),
{
    for (idx, line) in input.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let Some(values) = parse_tokens(&line) else {
            log::debug!("{origin}:{line_no}: non-integer token, line skipped");
            continue;
        };
        if values.is_empty() {
            continue;
        }
        if values.len() < 3 || values.len() % 2 == 0 {
            return Err(Error::Format {
                origin: origin.to_string(),
                line: line_no,
                reason: format!(
                    "expected an odd token count of at least 3, got {}",
                    values.len()
                ),
            });
        }
        let successors = values[1..]
            .chunks_exact(2)
            .map(|pair| Successor {
                cost: pair[0],
                h: pair[1],
            })
            .collect();
        consume(SuccessorRecord {
            parent_h: values[0],
            successors,
        });
    }
    Ok(())
}

/// Stream successor-expansion records from a file
pub fn stream_successors_file<F>(path: &Path, consume: F) -> Result<()>
where
    F: FnMut(SuccessorRecord),
{
    let input = BufReader::new(File::open(path)?);
    stream_successors(input, &path.display().to_string(), consume)
}

/// Merge raw one-sample-per-line data into `histogram`.
///
/// Lines follow the collector's per-key-shape layout (see
/// [`HistogramKey::from_raw_sample`]): `h hstar` for scalar keys,
/// `h hstar parentH` for pair keys. Every matching line adds exactly one
/// sample; any other line shape is skipped.
pub fn read_raw_samples<K, R>(input: R, histogram: &mut SampleHistogram<K>) -> Result<()>
where
    K: HistogramKey,
    R: BufRead,
{
    for line in input.lines() {
        let line = line?;
        let Some(values) = parse_tokens(&line) else {
            continue;
        };
        if values.len() != K::TOKENS + 1 {
            continue;
        }
        let (key, outcome) = K::from_raw_sample(&values);
        histogram.add_sample(key, outcome, 1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_distribution_accumulates_totals_and_pairs() {
        let data = "5 4 2 3 4 1\n5 2 2 1 6 1\n7 1 9 1\n";
        let mut hist = SampleHistogram::new();
        read_distribution(Cursor::new(data), "test", &mut hist).unwrap();

        let counts = hist.get(&5i64).unwrap();
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.outcome_count(2), 4);
        assert_eq!(counts.outcome_count(4), 1);
        assert_eq!(counts.outcome_count(6), 1);
        assert_eq!(hist.get(&7i64).unwrap().total(), 1);
        hist.check_conservation().unwrap();
    }

    #[test]
    fn test_distribution_skips_malformed_lines() {
        // one good line, one odd token count, one non-integer, one blank
        let data = "5 4 2 3 4 1\n5 4 2\nfive 4 2 3\n\n";
        let mut hist = SampleHistogram::new();
        read_distribution(Cursor::new(data), "test", &mut hist).unwrap();

        assert_eq!(hist.len(), 1);
        assert_eq!(hist.get(&5i64).unwrap().total(), 4);
    }

    #[test]
    fn test_distribution_rejects_nonpositive_total() {
        let data = "5 0 2 3\n";
        let mut hist = SampleHistogram::<i64>::new();
        let err = read_distribution(Cursor::new(data), "test", &mut hist).unwrap_err();
        assert!(matches!(err, Error::Format { line: 1, .. }));
    }

    #[test]
    fn test_distribution_rejects_negative_count() {
        let data = "5 4 2 -3\n";
        let mut hist = SampleHistogram::<i64>::new();
        let err = read_distribution(Cursor::new(data), "test", &mut hist).unwrap_err();
        assert!(matches!(err, Error::Format { line: 1, .. }));
    }

    #[test]
    fn test_distribution_pair_keys() {
        let data = "3 9 2 5 1 6 1\n";
        let mut hist = SampleHistogram::new();
        read_distribution(Cursor::new(data), "test", &mut hist).unwrap();

        let counts = hist.get(&(3i64, 9i64)).unwrap();
        assert_eq!(counts.total(), 2);
        assert_eq!(counts.outcome_count(5), 1);
    }

    #[test]
    fn test_round_trip_serialization() {
        let mut hist = SampleHistogram::new();
        hist.add_sample(1i64, 3, 2);
        hist.add_sample(1i64, 7, 5);
        hist.add_sample(-4i64, 0, 1);

        let mut out = Vec::new();
        hist.write_to(&mut out).unwrap();

        let mut reread = SampleHistogram::new();
        read_distribution(Cursor::new(out), "round-trip", &mut reread).unwrap();
        assert_eq!(hist, reread);
    }

    #[test]
    fn test_successors_stream_in_order() {
        let data = "4 1 3 0 5\n2 7 1\n";
        let mut records = Vec::new();
        stream_successors(Cursor::new(data), "test", |record| records.push(record)).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].parent_h, 4);
        assert_eq!(
            records[0].successors,
            vec![Successor { cost: 1, h: 3 }, Successor { cost: 0, h: 5 }]
        );
        assert_eq!(records[1].parent_h, 2);
        assert_eq!(records[1].successors, vec![Successor { cost: 7, h: 1 }]);
    }

    #[test]
    fn test_successors_skip_noninteger_lines() {
        let data = "4 1 3\nnoise here\n2 7 1\n";
        let mut count = 0;
        stream_successors(Cursor::new(data), "test", |_| count += 1).unwrap();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_successors_reject_even_token_count() {
        let data = "4 1 3 0\n";
        let err = stream_successors(Cursor::new(data), "test", |_| {}).unwrap_err();
        assert!(matches!(err, Error::Format { line: 1, .. }));
    }

    #[test]
    fn test_raw_samples_count_one_each() {
        let data = "5 7\n5 7\n5 9\n3 4\nbad line\n5 9 1\n";
        let mut hist = SampleHistogram::new();
        read_raw_samples::<i64, _>(Cursor::new(data), &mut hist).unwrap();

        let counts = hist.get(&5i64).unwrap();
        assert_eq!(counts.total(), 3);
        assert_eq!(counts.outcome_count(7), 2);
        assert_eq!(counts.outcome_count(9), 1);
        assert_eq!(hist.get(&3i64).unwrap().total(), 1);
    }

    #[test]
    fn test_raw_samples_pair_keys_use_collector_layout() {
        // columns are h, observed h*, parent h; the key is (h, parent h)
        let data = "5 7 6\n5 7 6\n5 3 2\n";
        let mut hist = SampleHistogram::new();
        read_raw_samples::<(i64, i64), _>(Cursor::new(data), &mut hist).unwrap();

        let counts = hist.get(&(5, 6)).unwrap();
        assert_eq!(counts.total(), 2);
        assert_eq!(counts.outcome_count(7), 2);
        assert_eq!(hist.get(&(5, 2)).unwrap().outcome_count(3), 1);
    }
}
