//! Pipeline driver
//!
//! Sequences the stages: read the merged h* distribution, derive averages,
//! stream every successor file through the backup simulator, combine, and
//! serialize the post-expansion distribution. Stages run strictly in order;
//! the average table must be complete before the first record is simulated.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use belief_histogram::{HistogramKey, SampleHistogram};

use crate::backup::SelectionTable;
use crate::combine::combine;
use crate::error::Result;
use crate::expectation::AverageTable;
use crate::observer::PipelineObserver;
use crate::reader;

/// Regular files in `dir`, sorted by path for deterministic progress
fn files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();
    Ok(files)
}

/// Run the full post-expansion pipeline.
///
/// Reads the merged h* distribution from `hstar_path`, replays every
/// successor file in `successors_dir` through the backup rule, and writes
/// the combined per-parent f-value distribution to `output` (keys ascending,
/// outcomes ascending). Progress and diagnostics go to `observer` only.
pub fn run<W: Write>(
    hstar_path: &Path,
    successors_dir: &Path,
    output: &mut W,
    observer: &mut dyn PipelineObserver,
) -> Result<()> {
    observer.stage_started("reading h* distribution");
    let mut hstar = SampleHistogram::new();
    reader::read_distribution_file(hstar_path, &mut hstar)?;
    hstar.check_conservation()?;

    observer.stage_started("computing h* averages");
    let averages = AverageTable::from_histogram(&hstar)?;
    observer.averages_ready(&averages);

    observer.stage_started("simulating backups over successor files");
    let files = files_in(successors_dir)?;
    let total = files.len();
    let mut selections = SelectionTable::new();
    for (done, path) in files.iter().enumerate() {
        reader::stream_successors_file(path, |record| {
            if !selections.observe(&record, &averages) {
                observer.record_dropped(record.parent_h);
            }
        })?;
        observer.file_processed(done + 1, total);
    }

    observer.stage_started("combining post-expansion beliefs");
    let post = combine(&selections, &hstar)?;

    observer.stage_started("writing combined data");
    post.write_to(output)?;
    Ok(())
}

/// Merge a directory of raw one-sample-per-line files into one histogram.
///
/// The stage-one sibling of the full pipeline: builds the merged
/// distribution that [`run`] later consumes, for either key shape.
pub fn merge_raw_directory<K: HistogramKey>(dir: &Path) -> Result<SampleHistogram<K>> {
    let mut histogram = SampleHistogram::new();
    for path in files_in(dir)? {
        let input = std::io::BufReader::new(fs::File::open(&path)?);
        reader::read_raw_samples(input, &mut histogram)?;
    }
    Ok(histogram)
}
