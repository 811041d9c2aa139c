use crate::config::LoggingConfig;
use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// Install the global subscriber. Call once at startup.
///
/// Output goes to stderr so that stdout stays free for command results and
/// the JSON-RPC stream. `RUST_LOG` takes precedence over the configured level.
pub fn init_telemetry(logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    tracing::debug!(level = %logging.level, json = logging.json, "telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the log lines of one request
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Span wrapping a single dispatched request
pub fn create_request_span(operation: &str, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "git_request",
        operation = operation,
        correlation.id = correlation_id,
    )
}

/// Flush and shut down telemetry
pub fn shutdown_telemetry() {
    // The fmt layer writes synchronously; nothing to flush.
    tracing::debug!("telemetry shutdown complete");
}
