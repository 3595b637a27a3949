//! Histogram key types
//!
//! Belief histograms are keyed either by a single heuristic value or by a
//! pair of heuristic values (a state's h together with its parent's h). Both
//! shapes share one histogram type through the [`HistogramKey`] trait.

use std::fmt::Write as _;

/// A discrete histogram key that knows its own text representation.
///
/// On a serialized line a key occupies a fixed number of leading
/// whitespace-separated integer tokens, followed by the total sample count
/// and the outcome/count pairs.
pub trait HistogramKey: Copy + Ord {
    /// Number of integer tokens the key occupies on a line
    const TOKENS: usize;

    /// Decode a key from its leading tokens; `tokens.len() == Self::TOKENS`
    fn from_tokens(tokens: &[i64]) -> Self;

    /// Decode one raw collector line into `(key, outcome)`;
    /// `tokens.len() == Self::TOKENS + 1`.
    ///
    /// Raw collector layouts differ per key shape and do not put the key
    /// tokens first: scalar lines are `h hstar`, pair lines are
    /// `h hstar parentH` keyed by `(h, parentH)`. Serialized merged lines
    /// always lead with the key tokens regardless.
    fn from_raw_sample(tokens: &[i64]) -> (Self, i64);

    /// Append the key's tokens to a line buffer
    fn format_into(&self, line: &mut String);
}

impl HistogramKey for i64 {
    const TOKENS: usize = 1;

    fn from_tokens(tokens: &[i64]) -> Self {
        tokens[0]
    }

    fn from_raw_sample(tokens: &[i64]) -> (Self, i64) {
        (tokens[0], tokens[1])
    }

    fn format_into(&self, line: &mut String) {
        let _ = write!(line, "{self}");
    }
}

impl HistogramKey for (i64, i64) {
    const TOKENS: usize = 2;

    fn from_tokens(tokens: &[i64]) -> Self {
        (tokens[0], tokens[1])
    }

    fn from_raw_sample(tokens: &[i64]) -> (Self, i64) {
        // collector column order: h, observed h*, parent h
        ((tokens[0], tokens[2]), tokens[1])
    }

    fn format_into(&self, line: &mut String) {
        let _ = write!(line, "{} {}", self.0, self.1);
    }
}
