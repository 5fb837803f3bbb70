//! Prometheus wiring for the prediction pipeline.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use phishnet::{ClassifierError, Label, PipelineMetrics};
use std::sync::Arc;
use std::time::Duration;

pub const PREDICTIONS_TOTAL: &str = "phishnet_predictions_total";
pub const STAGE_LATENCY_SECONDS: &str = "phishnet_stage_latency_seconds";
pub const STAGE_ERRORS_TOTAL: &str = "phishnet_stage_errors_total";
pub const TOKENS_UNMATCHED_TOTAL: &str = "phishnet_tokens_unmatched_total";

/// Forwards pipeline events to the global `metrics` recorder.
#[derive(Debug, Default)]
pub struct PrometheusPipelineMetrics;

impl PipelineMetrics for PrometheusPipelineMetrics {
    fn record_features(&self, latency: Duration, tokens: usize, matched: usize) {
        histogram!(STAGE_LATENCY_SECONDS, "stage" => "features").record(latency.as_secs_f64());
        counter!(TOKENS_UNMATCHED_TOTAL).increment(tokens.saturating_sub(matched) as u64);
    }

    fn record_classifier(
        &self,
        model: &'static str,
        latency: Duration,
        result: Result<Label, &ClassifierError>,
    ) {
        histogram!(STAGE_LATENCY_SECONDS, "stage" => model).record(latency.as_secs_f64());
        match result {
            Ok(label) => {
                counter!(PREDICTIONS_TOTAL, "model" => model, "label" => label.as_str())
                    .increment(1);
            }
            Err(_) => counter!(STAGE_ERRORS_TOTAL, "stage" => model).increment(1),
        }
    }
}

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Install the process-wide Prometheus recorder and hook the pipeline into
/// it. Call at most once per process, from inside a tokio runtime.
pub fn install() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    // Histogram buckets are only drained by upkeep.
    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            ticker.tick().await;
            upkeep.run_upkeep();
        }
    });

    phishnet::set_pipeline_metrics(Some(Arc::new(PrometheusPipelineMetrics)));
    Ok(handle)
}
