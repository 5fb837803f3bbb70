use crate::config::ServerConfig;
use crate::error::ServerResult;
use metrics_exporter_prometheus::PrometheusHandle;
use phishnet::Detector;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Loaded artifacts, shared read-only across requests
    pub detector: Arc<Detector>,

    /// Prometheus renderer; `None` when metrics are disabled
    pub metrics: Option<PrometheusHandle>,
}

impl ServerState {
    /// Load the detector named by `config`. Fails if any artifact is
    /// missing or malformed.
    pub fn new(config: ServerConfig, metrics: Option<PrometheusHandle>) -> ServerResult<Self> {
        let detector_config = config.detector()?;
        let detector = Detector::from_config(&detector_config)?;
        Ok(Self::with_detector(config, detector, metrics))
    }

    pub fn with_detector(
        config: ServerConfig,
        detector: Detector,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            detector: Arc::new(detector),
            metrics,
        }
    }
}
