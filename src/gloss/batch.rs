/*!
 * Batch translation.
 *
 * Translates many phrases concurrently over one shared vocabulary snapshot.
 * Results come back in input order and a failed phrase never aborts the rest.
 */

use futures::stream::{self, StreamExt};
use log::{error, info};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use crate::errors::TranslationError;
use crate::export::ClipExporter;

use super::engine::{GlossEngine, TranslationOutcome};

/// One phrase to translate and where to write it
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub phrase: String,
    pub destination: PathBuf,
}

/// Outcome for one job, tagged with its input position
#[derive(Debug)]
pub struct BatchItem {
    pub index: usize,
    pub phrase: String,
    pub result: Result<TranslationOutcome, TranslationError>,
}

/// Collected results of a batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub items: Vec<BatchItem>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    /// Mean coverage over successful items, 0.0 if none succeeded
    pub fn mean_coverage(&self) -> f32 {
        let fractions: Vec<f32> = self
            .items
            .iter()
            .filter_map(|i| i.result.as_ref().ok())
            .map(|o| o.coverage.fraction)
            .collect();
        if fractions.is_empty() {
            0.0
        } else {
            fractions.iter().sum::<f32>() / fractions.len() as f32
        }
    }
}

/// Runs translations with bounded concurrency
#[derive(Debug, Clone)]
pub struct BatchTranslator {
    engine: GlossEngine,
    exporter: Arc<dyn ClipExporter>,
    max_concurrent: usize,
}

impl BatchTranslator {
    pub fn new(engine: GlossEngine, exporter: Arc<dyn ClipExporter>, max_concurrent: usize) -> Self {
        Self {
            engine,
            exporter,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Translate every job, reporting `(done, total)` after each one
    pub async fn translate_all(
        &self,
        jobs: &[BatchJob],
        progress_callback: impl Fn(usize, usize) + Clone,
    ) -> BatchReport {
        let total = jobs.len();
        let processed = Arc::new(AtomicUsize::new(0));
        let started = Instant::now();

        let mut items = stream::iter(jobs.iter().enumerate())
            .map(|(index, job)| {
                let engine = self.engine.clone();
                let exporter = Arc::clone(&self.exporter);
                let processed = Arc::clone(&processed);
                let progress_callback = progress_callback.clone();

                async move {
                    let result = engine
                        .translate(&job.phrase, exporter.as_ref(), &job.destination)
                        .await;

                    let current = processed.fetch_add(1, Ordering::SeqCst) + 1;
                    progress_callback(current, total);

                    if let Err(e) = &result {
                        error!("Phrase {} ({:?}) failed: {}", index + 1, job.phrase, e);
                    }

                    BatchItem {
                        index,
                        phrase: job.phrase.clone(),
                        result,
                    }
                }
            })
            .buffer_unordered(self.max_concurrent)
            .collect::<Vec<_>>()
            .await;

        // restore input order
        items.sort_by_key(|item| item.index);

        let report = BatchReport { items };
        info!(
            "Batch finished in {:?}: {} succeeded, {} failed",
            started.elapsed(),
            report.succeeded(),
            report.failed()
        );
        report
    }
}
