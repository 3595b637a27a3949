//! Post-expansion belief construction
//!
//! Expands the selection table back into full distributions: each selected
//! successor's h* histogram is shifted by the transition cost (a discrete
//! convolution with a point mass) and scaled by how often that pair was
//! selected, then accumulated under the parent heuristic value. The outcome
//! axis of the result is `f = h*(successor) + transitionCost`.

use belief_histogram::SampleHistogram;

use crate::backup::SelectionTable;
use crate::error::{Error, Result};

/// Build the post-expansion f-value distribution per parent heuristic value.
///
/// Every selected successor must be present in `hstar`: it was only selected
/// because it had an average, and the average came from sample data. A
/// missing successor is a consistency violation, as is any conservation
/// failure in the result; both abort instead of emitting an unsound
/// distribution.
pub fn combine(
    selections: &SelectionTable,
    hstar: &SampleHistogram<i64>,
) -> Result<SampleHistogram<i64>> {
    let mut post = SampleHistogram::new();
    for (parent_h, parent) in selections.iter() {
        for (successor_h, cost, picks) in parent.iter() {
            let counts = hstar.get(&successor_h).ok_or_else(|| {
                Error::Consistency(format!(
                    "successor {successor_h} selected under parent {parent_h} \
                     has no h* samples"
                ))
            })?;
            for (hstar_value, samples) in counts.outcomes() {
                let weight = samples.checked_mul(picks).ok_or_else(|| {
                    Error::Consistency(format!(
                        "sample weight overflow under parent {parent_h}: \
                         {samples} samples x {picks} selections"
                    ))
                })?;
                post.add_sample(parent_h, hstar_value + cost, weight);
            }
        }
    }
    post.check_conservation()?;
    Ok(post)
}
