//! Prometheus metrics for relationship resolution and resource fetches.

use crate::relation::RelationType;
use once_cell::sync::Lazy;
use opentelemetry::{
    global,
    metrics::{Counter, Histogram},
    KeyValue,
};
use opentelemetry_prometheus::PrometheusExporter;
use std::time::Duration;

pub static METRICS: Lazy<LifelineMetrics> = Lazy::new(LifelineMetrics::init);

pub struct LifelineMetrics {
    /// `None` when the exporter could not be registered; instruments still record
    pub exporter: Option<PrometheusExporter>,
    pub resolutions_total: Counter<u64>,
    pub fetch_duration: Histogram<f64>,
}

impl LifelineMetrics {
    pub fn init() -> Self {
        let exporter = match opentelemetry_prometheus::exporter().build() {
            Ok(exporter) => Some(exporter),
            Err(e) => {
                log::warn!("failed to build prometheus exporter: {}", e);
                None
            }
        };
        let meter = global::meter("lifeline");

        let resolutions_total = meter.u64_counter("lifeline_relation_resolutions_total")
            .with_description("Relationship resolution attempts by strategy and outcome").build();

        let fetch_duration = meter.f64_histogram("lifeline_fetch_duration_seconds")
            .with_description("Duration of resource fetches").build();

        Self {
            exporter,
            resolutions_total,
            fetch_duration,
        }
    }

    pub fn record_resolution(&self, rel_type: RelationType, strategy: &'static str, found: bool) {
        let kind = match rel_type {
            RelationType::HasOne => "has_one",
            RelationType::HasMany => "has_many",
        };
        self.resolutions_total.add(
            1,
            &[
                KeyValue::new("kind", kind),
                KeyValue::new("strategy", strategy),
                KeyValue::new("found", found),
            ],
        );
    }

    pub fn record_fetch(&self, elapsed: Duration) {
        self.fetch_duration.record(elapsed.as_secs_f64(), &[]);
    }
}
