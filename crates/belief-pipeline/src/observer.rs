//! Progress and diagnostic reporting
//!
//! Reporting is a side effect orthogonal to correctness. The driver accepts
//! an observer instead of printing, so the pipeline is testable without
//! capturing console output and consumers can route diagnostics wherever
//! they like. Output data never flows through the observer.

use crate::expectation::AverageTable;

/// Receives pipeline progress and diagnostics.
///
/// All methods default to no-ops; implement only what you care about.
pub trait PipelineObserver {
    /// A pipeline stage began
    fn stage_started(&mut self, stage: &str) {
        let _ = stage;
    }

    /// The average table was derived from the h* distribution
    fn averages_ready(&mut self, averages: &AverageTable) {
        let _ = averages;
    }

    /// One successor file finished processing
    fn file_processed(&mut self, done: usize, total: usize) {
        let _ = (done, total);
    }

    /// A record had no successor with a known belief and was dropped
    fn record_dropped(&mut self, parent_h: i64) {
        let _ = parent_h;
    }
}

/// Observer that forwards everything to the `log` facade
#[derive(Debug, Default, Clone)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn stage_started(&mut self, stage: &str) {
        log::info!("{stage}");
    }

    fn averages_ready(&mut self, averages: &AverageTable) {
        for (h, average) in averages.iter() {
            log::debug!("h {h}: expected h* {average:.6}");
        }
    }

    fn file_processed(&mut self, done: usize, total: usize) {
        log::info!("processed {done} of {total} successor files");
    }

    fn record_dropped(&mut self, parent_h: i64) {
        log::trace!("no valid successor under parent h {parent_h}, record dropped");
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone)]
pub struct NullObserver;

impl PipelineObserver for NullObserver {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        stages: Vec<String>,
        dropped: Vec<i64>,
    }

    impl PipelineObserver for Recording {
        fn stage_started(&mut self, stage: &str) {
            self.stages.push(stage.to_string());
        }

        fn record_dropped(&mut self, parent_h: i64) {
            self.dropped.push(parent_h);
        }
    }

    #[test]
    fn test_default_methods_are_noops() {
        // a recording observer only overrides what it needs
        let mut observer = Recording::default();
        observer.stage_started("reading");
        observer.averages_ready(&AverageTable::default());
        observer.file_processed(1, 2);
        observer.record_dropped(4);

        assert_eq!(observer.stages, vec!["reading"]);
        assert_eq!(observer.dropped, vec![4]);
    }
}
