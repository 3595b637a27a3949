//! Error types for the belief pipeline
//!
//! Two failure classes abort a run: format errors, where a well-formed line
//! carries an impossible value (corrupt upstream aggregation), and
//! consistency violations, where internal bookkeeping disagrees with itself.
//! Line noise is not an error at all; readers skip malformed lines.

use thiserror::Error;

/// Error type for pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    /// A structurally valid line carried a value the format forbids
    #[error("format error in {origin} line {line}: {reason}")]
    Format {
        origin: String,
        line: usize,
        reason: String,
    },

    /// Internal bookkeeping invariant failed; no output may be emitted
    #[error("consistency violation: {0}")]
    Consistency(String),

    /// Histogram bookkeeping error
    #[error(transparent)]
    Histogram(#[from] belief_histogram::Error),

    /// IO error (for file operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;
