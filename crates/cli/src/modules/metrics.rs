use std::sync::atomic::{AtomicU64, Ordering};

use http::{Response, StatusCode};
use modhost_core::{Application, EndpointRegistry, Module};

/// Scrape counter owned by the `/metrics` handler
#[derive(Debug, Default)]
pub struct Metrics {
    requests: AtomicU64,
}

impl Metrics {
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Prometheus text exposition
    pub fn render(&self) -> String {
        format!(
            "# TYPE modhost_requests_total counter\nmodhost_requests_total {}\n",
            self.requests()
        )
    }
}

/// Exposes request metrics, unless `metrics.enabled` is false
#[derive(Debug, Default)]
pub struct MetricsModule;

impl MetricsModule {
    fn enabled(settings: &modhost_core::HostSettings) -> bool {
        settings.get::<bool>("metrics.enabled").unwrap_or(true)
    }
}

impl Module for MetricsModule {
    fn configure_application(&self, app: &mut Application) -> anyhow::Result<()> {
        if Self::enabled(app.settings()) {
            app.use_middleware("metrics");
        }
        Ok(())
    }

    fn configure_endpoints(&self, endpoints: &mut EndpointRegistry) -> anyhow::Result<()> {
        let metrics = Metrics::default();
        endpoints
            .map_get("/metrics", move |_| {
                metrics.record_request();
                Response::builder()
                    .status(StatusCode::OK)
                    .header("content-type", "text/plain; version=0.0.4")
                    .body(metrics.render())
                    .unwrap_or_default()
            })?
            .with_name("metrics");
        Ok(())
    }
}
