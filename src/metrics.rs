// src/metrics.rs
use axum::{routing::get, Router};
use metrics::{counter, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

use crate::result::SentimentResult;

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder once per process; later calls reuse the handle.
    /// Also exposes a static gauge with the configured scoring timeout.
    pub fn init(request_timeout_ms: u64) -> anyhow::Result<Self> {
        let handle = match HANDLE.get() {
            Some(h) => h.clone(),
            None => {
                let h = PrometheusBuilder::new()
                    .install_recorder()
                    .map_err(|e| anyhow::anyhow!("prometheus: install recorder: {e}"))?;
                HANDLE.get_or_init(|| h).clone()
            }
        };

        gauge!("sentiment_request_timeout_ms").set(request_timeout_ms as f64);

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// Count one finished analysis by method, plus degradations. No-op without a recorder.
pub fn record_analysis(result: &SentimentResult) {
    counter!("sentiment_analyses_total", "method" => result.method.as_str()).increment(1);
    if result.is_degraded() {
        counter!("sentiment_degraded_total").increment(1);
    }
}
