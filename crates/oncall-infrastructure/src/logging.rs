//! Tracing subscriber setup.

use anyhow::{Context, Result};
use oncall_core::config::LoggingConfig;
use oncall_execution::{TriageEvent, TriageEventLayer};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builds the filter: `RUST_LOG` wins, otherwise the configured directive.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter)
            .with_context(|| format!("Invalid log filter '{}'", config.filter)),
    }
}

/// Installs the global subscriber.
///
/// When `forward_events` is set, triage events are also streamed to the
/// returned receiver for the rendering layer to drain.
pub fn init_tracing(
    config: &LoggingConfig,
) -> Result<Option<mpsc::UnboundedReceiver<TriageEvent>>> {
    let filter = env_filter(config)?;
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    let (event_layer, receiver) = if config.forward_events {
        let (layer, receiver) = TriageEventLayer::channel();
        (Some(layer), Some(receiver))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .with(event_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(receiver)
}
