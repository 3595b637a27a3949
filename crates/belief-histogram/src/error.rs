//! Error types for belief histograms

use thiserror::Error;

/// Error type for histogram bookkeeping
#[derive(Error, Debug)]
pub enum Error {
    /// A key's recorded total disagrees with the sum of its outcome counts
    #[error("count conservation violated for key {key}: total {total}, outcome sum {sum}")]
    CountConservation {
        key: String,
        total: u64,
        sum: u64,
    },
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
