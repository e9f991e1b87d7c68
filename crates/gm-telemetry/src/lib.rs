//! # Guardian Messenger Telemetry
//!
//! Structured logging and Prometheus metrics shared by every subsystem.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gm_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::for_subsystem("06", "message-processor");
//!     init_telemetry(&config).expect("telemetry");
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GM_SERVICE_NAME` | `guardian-messenger` | Service name in log records |
//! | `GM_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `GM_JSON_LOGS` | `false` | Emit JSON log lines |
//! | `GM_CONSOLE_OUTPUT` | `true` | Write logs to stdout |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, ATTESTATION_POLLS, MESSAGES_DELIVERED,
    MESSAGES_REJECTED, MESSAGES_SENT, REGISTRY, REPLAYS, SIGNATURE_VERIFICATIONS,
    VERIFICATION_DURATION,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    /// A metric could not be registered or encoded.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Configuration was rejected.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global tracing subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    register_metrics()?;
    init_tracing(config)
}
