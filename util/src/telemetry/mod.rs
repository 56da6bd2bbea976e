//! Defines helpers for logging

use std::{error::Error, fmt::Display};
pub use tracing_subscriber::{filter::LevelFilter, fmt::format::Format};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

pub mod metrics;

/// Possible errors that occur when setting up telemetry
/// for the client
#[derive(Debug)]
pub enum TelemetrySetupError {
    /// Error emitted when setting up the statsd metrics recorder
    Metrics(String),
}

impl Error for TelemetrySetupError {}
impl Display for TelemetrySetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Initialize a logger at the given log level
pub fn setup_system_logger(level: LevelFilter) {
    tracing_subscriber::fmt().event_format(Format::default().pretty()).with_max_level(level).init();
}

/// A builder for configuring telemetry for the client
#[derive(Default)]
pub struct TelemetryBuilder {
    /// The subscriber layers to add to the telemetry stack
    layers: Vec<Box<dyn Layer<Registry> + Send + Sync + 'static>>,
}

impl TelemetryBuilder {
    /// Add a subscriber layer to the telemetry builder
    fn with_layer<L: Layer<Registry> + Send + Sync>(mut self, layer: L) -> Self {
        self.layers.push(layer.boxed());
        self
    }

    /// Configure logging for the client
    pub fn with_logging(self) -> Self {
        self.with_layer(fmt::layer().pretty())
    }

    /// Configure StatsD metrics for the client
    pub fn with_metrics(
        self,
        statsd_host: &str,
        statsd_port: u16,
    ) -> Result<Self, TelemetrySetupError> {
        metrics::configure_metrics_statsd_recorder(statsd_host, statsd_port)?;

        Ok(self.with_layer(metrics_tracing_context::MetricsLayer::new()))
    }

    /// Initialize the global subscriber with the configured telemetry layers
    pub fn build(self) {
        let layers = self.layers.with_filter(
            EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy(),
        );
        tracing_subscriber::registry().with(layers).init()
    }
}

/// Configures logging and metrics for the client based on the
/// caller-provided toggles
pub fn configure_telemetry(
    metrics_enabled: bool,
    statsd_host: &str,
    statsd_port: u16,
) -> Result<(), TelemetrySetupError> {
    let mut telemetry = TelemetryBuilder::default().with_logging();

    if metrics_enabled {
        telemetry = telemetry.with_metrics(statsd_host, statsd_port)?;
    }

    telemetry.build();

    Ok(())
}
