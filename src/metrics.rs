//! Pluggable observer for prediction stages.
//!
//! The library does not depend on a metrics backend. Callers that want
//! latency and outcome numbers install a [`PipelineMetrics`] recorder once
//! with [`set_pipeline_metrics`]; with no recorder installed the hooks cost
//! one uncontended read lock per stage.

use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use classifier::{ClassifierError, Label};

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    /// Tokenize + vectorize finished; `matched` of `tokens` were in vocabulary.
    fn record_features(&self, latency: Duration, tokens: usize, matched: usize);

    /// One classifier finished. `model` is the classifier's
    /// [`name`](classifier::BinaryClassifier::name).
    fn record_classifier(
        &self,
        model: &'static str,
        latency: Duration,
        result: Result<Label, &ClassifierError>,
    );
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

pub(crate) struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    pub(crate) fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    pub(crate) fn record_features(self, tokens: usize, matched: usize) {
        self.recorder
            .record_features(self.start.elapsed(), tokens, matched);
    }

    pub(crate) fn record_classifier(
        self,
        model: &'static str,
        result: Result<Label, &ClassifierError>,
    ) {
        self.recorder
            .record_classifier(model, self.start.elapsed(), result);
    }
}
