//! # Registry Telemetry
//!
//! Logging and metrics bootstrap for the name registry.
//!
//! ## Components
//!
//! - **Logs**: `tracing-subscriber` with an env filter and a pretty or JSON layer
//! - **Metrics**: Prometheus counters and gauges, encodable as text
//!
//! ## Usage
//!
//! ```rust,ignore
//! use registry_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _metrics = init_telemetry(&TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `OTEL_SERVICE_NAME` | `name-registry` | Service name in logs |
//! | `NL_LOG_LEVEL` | `info` | Log level filter |
//! | `NL_JSON_LOGS` | `false` | JSON log lines |
//! | `NL_CONSOLE_OUTPUT` | `true` | Write logs to the console |

#![warn(missing_docs)]

mod config;
mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, DOMAINS, ESCROW_BALANCE, REGISTRATIONS,
    REGISTRY, REJECTIONS, REMOVALS,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing: {0}")]
    TracerInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// The configuration is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics, then install the tracing subscriber.
///
/// Keep the returned handle for the lifetime of the process.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<MetricsHandle, TelemetryError> {
    let metrics_handle = register_metrics()?;
    init_tracing(config)?;
    Ok(metrics_handle)
}
