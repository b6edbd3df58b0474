//! Prometheus metrics for the name registry.
//!
//! All metrics follow the naming convention: `nl_registry_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., registrations_total)
//! - **Gauge**: Value that can go up or down (e.g., domains)

use lazy_static::lazy_static;
use prometheus::{CounterVec, Encoder, Gauge, IntGauge, Opts, Registry, TextEncoder};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Successful claims and presets, by path (standard/fast/preset)
    pub static ref REGISTRATIONS: CounterVec = CounterVec::new(
        Opts::new("nl_registry_registrations_total", "Total successful registrations"),
        &["path"]
    ).expect("metric creation failed");

    /// Removed records, by path (owner/administrator)
    pub static ref REMOVALS: CounterVec = CounterVec::new(
        Opts::new("nl_registry_removals_total", "Total removed records"),
        &["path"]
    ).expect("metric creation failed");

    /// Rejected operations, by error kind
    pub static ref REJECTIONS: CounterVec = CounterVec::new(
        Opts::new("nl_registry_rejections_total", "Total rejected operations"),
        &["error"]
    ).expect("metric creation failed");

    /// Current number of records
    pub static ref DOMAINS: IntGauge = IntGauge::new(
        "nl_registry_domains",
        "Current number of records in the registry"
    ).expect("metric creation failed");

    /// Funds currently held in escrow, in base units
    pub static ref ESCROW_BALANCE: Gauge = Gauge::new(
        "nl_registry_escrow_balance",
        "Funds currently held in escrow"
    ).expect("metric creation failed");
}

/// Handle to the registered metrics.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(REGISTRATIONS.clone()),
        Box::new(REMOVALS.clone()),
        Box::new(REJECTIONS.clone()),
        Box::new(DOMAINS.clone()),
        Box::new(ESCROW_BALANCE.clone()),
    ];

    for metric in metrics {
        REGISTRY
            .register(metric)
            .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
