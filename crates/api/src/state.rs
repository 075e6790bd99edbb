use pbdns_exporter_infrastructure::metrics::ExporterMetrics;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub metrics: Arc<ExporterMetrics>,
    pub metrics_path: Arc<str>,
}

impl AppState {
    pub fn new(metrics: Arc<ExporterMetrics>, metrics_path: &str) -> Self {
        Self {
            metrics,
            metrics_path: Arc::from(metrics_path),
        }
    }
}
