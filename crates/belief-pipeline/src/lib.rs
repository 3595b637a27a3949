//! Post-expansion belief construction for heuristic search
//!
//! This crate turns logged search training data into the distribution of
//! f-values an agent should expect right after expanding a state and
//! committing to its best-looking successor under a one-step lookahead.
//!
//! The pipeline runs in four strictly sequential stages:
//!
//! 1. **read** — merge the pre-aggregated h* distribution file into a
//!    [`SampleHistogram`](belief_histogram::SampleHistogram);
//! 2. **average** — derive the count-weighted expected h* per heuristic
//!    value ([`AverageTable`]);
//! 3. **simulate** — stream successor-expansion records through the greedy
//!    backup rule, counting which `(successor h, transition cost)` each
//!    parent commits to ([`SelectionTable`]);
//! 4. **combine** — convolve each selected successor's h* distribution with
//!    its transition cost into the final per-parent f-value distribution.
//!
//! Averages must be complete before any record is simulated, so the stages
//! cannot be interleaved. Successor files are streamed one line at a time;
//! no file's records are ever held in memory at once.
//!
//! # Example
//!
//! ```rust
//! use belief_histogram::SampleHistogram;
//! use belief_pipeline::{combine, AverageTable, SelectionTable, Successor, SuccessorRecord};
//!
//! let mut hstar = SampleHistogram::new();
//! hstar.add_sample(2i64, 5, 2);
//! hstar.add_sample(2i64, 6, 1);
//!
//! let averages = AverageTable::from_histogram(&hstar).unwrap();
//! let mut selections = SelectionTable::new();
//! let record = SuccessorRecord {
//!     parent_h: 1,
//!     successors: vec![Successor { cost: 1, h: 2 }],
//! };
//! assert!(selections.observe(&record, &averages));
//!
//! let post = combine(&selections, &hstar).unwrap();
//! assert_eq!(post.get(&1).unwrap().total(), 3);
//! ```

pub mod backup;
pub mod combine;
pub mod driver;
pub mod error;
pub mod expectation;
pub mod observer;
pub mod reader;

pub use backup::{SelectionTable, Successor, SuccessorRecord};
pub use combine::combine;
pub use driver::{merge_raw_directory, run};
pub use error::{Error, Result};
pub use expectation::AverageTable;
pub use observer::{LogObserver, NullObserver, PipelineObserver};
