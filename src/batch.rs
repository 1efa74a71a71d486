//! Concurrent extraction over many containers.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, mpsc};
use std::thread;

use serde::Serialize;
use tracing::debug;

use crate::core::{ExtractorError, Result};
use crate::extractor::{ExtractionOutcome, Extractor, batch_output_path};
use crate::input::filter_pdfs;

/// Settings for a batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Upper bound on worker threads; clamped to `1..=inputs`.
    pub workers: usize,
    /// When set, every output becomes `<dir>/<container stem>.xml`.
    pub output_dir: Option<PathBuf>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            output_dir: None,
        }
    }
}

/// Aggregated result of a batch run. Outcome order is unspecified.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub outcomes: Vec<ExtractionOutcome>,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    fn from_outcomes(outcomes: Vec<ExtractionOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - succeeded;
        Self {
            outcomes,
            succeeded,
            failed,
        }
    }

    pub fn processed(&self) -> usize {
        self.outcomes.len()
    }
}

/// Runs one [`Extractor`] over many containers on a fixed pool of threads.
#[derive(Debug)]
pub struct BatchProcessor<'a> {
    extractor: &'a Extractor,
    config: BatchConfig,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(extractor: &'a Extractor, config: BatchConfig) -> Self {
        Self { extractor, config }
    }

    /// Process every `.pdf` among `inputs`.
    ///
    /// Non-PDF paths never reach a worker. Fails with
    /// [`ExtractorError::InputPatternEmpty`] before spawning anything when no
    /// PDF remains. Individual failures are collected in the report.
    pub fn run(&self, inputs: &[PathBuf], pattern: &str) -> Result<BatchReport> {
        let pdfs = filter_pdfs(inputs);
        if pdfs.is_empty() {
            return Err(ExtractorError::InputPatternEmpty {
                pattern: pattern.to_string(),
            });
        }

        let workers = self.config.workers.clamp(1, pdfs.len());
        debug!(files = pdfs.len(), workers, "starting batch");

        let jobs = Mutex::new(pdfs.into_iter());
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            for worker in 0..workers {
                let tx = tx.clone();
                let jobs = &jobs;
                scope.spawn(move || {
                    while let Some(input) = next_job(jobs) {
                        debug!(worker, input = %input.display(), "worker picked up file");
                        let outcome = self.process(&input);
                        if tx.send(outcome).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        // All workers have joined; dropping the last sender closes the stream.
        drop(tx);

        let outcomes: Vec<ExtractionOutcome> = rx.into_iter().collect();
        Ok(BatchReport::from_outcomes(outcomes))
    }

    fn process(&self, input: &Path) -> ExtractionOutcome {
        let output = self
            .config
            .output_dir
            .as_deref()
            .map(|dir| batch_output_path(input, dir));
        self.extractor.extract(input, output.as_deref()).into()
    }
}

fn next_job(jobs: &Mutex<std::vec::IntoIter<PathBuf>>) -> Option<PathBuf> {
    // The iterator stays consistent even if a holder panicked.
    let mut guard = jobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.next()
}
