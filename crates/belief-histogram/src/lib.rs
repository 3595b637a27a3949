//! Keyed sample histograms for search belief data
//!
//! A [`SampleHistogram`] records, for each discrete key (a heuristic value,
//! or a pair of heuristic values), a total sample count and a count per
//! observed outcome. The same shape serves both raw h* distributions (key =
//! heuristic value, outcome = observed true cost) and post-expansion belief
//! distributions (key = parent heuristic value, outcome = backed-up f-value).
//!
//! Accumulation is centralized here so the count-conservation invariant
//! (`total == Σ outcome counts` for every key) can be checked in one place.
//!
//! # Example
//!
//! ```rust
//! use belief_histogram::SampleHistogram;
//!
//! let mut hist = SampleHistogram::new();
//! hist.add_sample(5i64, 2, 3);
//! hist.add_sample(5i64, 4, 1);
//!
//! assert_eq!(hist.get(&5).unwrap().total(), 4);
//! hist.check_conservation().unwrap();
//! ```

pub mod error;
pub mod key;
pub mod store;

pub use error::{Error, Result};
pub use key::HistogramKey;
pub use store::{KeyCounts, SampleHistogram};
