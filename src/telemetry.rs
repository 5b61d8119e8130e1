use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use crate::config::ObservabilityConfig;

/// Initialize structured logging.
///
/// Logs go to stderr so board output on stdout stays readable; `RUST_LOG`
/// overrides the configured level.
pub fn init_telemetry(settings: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    if settings.json_logs {
        registry
            .with(fmt_layer.json().with_current_span(true).with_span_list(true))
            .try_init()?;
    } else {
        registry.with(fmt_layer.compact()).try_init()?;
    }

    tracing::debug!("Talent Map telemetry initialized");
    Ok(())
}

/// Generate a correlation ID for linking the log lines of one board action
pub fn generate_correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Create a span with the common attributes of an operator action
pub fn create_action_span(action: &str, file_id: Option<&str>, correlation_id: &str) -> tracing::Span {
    tracing::info_span!(
        "board_action",
        action = action,
        candidate.file = file_id,
        correlation.id = correlation_id,
    )
}
