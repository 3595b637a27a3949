//! Post-expansion belief training data for heuristic search
//!
//! Umbrella crate re-exporting the workspace members:
//!
//! - [`histogram`] — keyed sample histograms with count-conservation
//!   checking and the shared text serialization;
//! - [`pipeline`] — readers, the expected-h* table, the greedy backup
//!   simulator, the distribution combiner, and the driver tying them
//!   together.
//!
//! The typical batch run is a single call:
//!
//! ```rust,no_run
//! use std::io;
//! use std::path::Path;
//! use search_beliefs::pipeline::{run, LogObserver};
//!
//! let mut stdout = io::stdout().lock();
//! run(
//!     Path::new("hstar_data"),
//!     Path::new("successors"),
//!     &mut stdout,
//!     &mut LogObserver,
//! ).unwrap();
//! ```

pub use belief_histogram as histogram;
pub use belief_pipeline as pipeline;

pub use belief_histogram::{HistogramKey, KeyCounts, SampleHistogram};
pub use belief_pipeline::{
    combine, run, AverageTable, LogObserver, NullObserver, PipelineObserver, SelectionTable,
    Successor, SuccessorRecord,
};
