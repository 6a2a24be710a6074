//! Tracing layer that streams triage events to the rendering layer.
//!
//! The controller reports its transitions through ordinary `tracing` macros
//! under the `oncall` target prefix. Installing this layer turns those
//! records into [`TriageEvent`]s on a tokio channel, which a renderer can
//! drain to show inline notifications without polling.

use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Target prefix of events worth forwarding.
pub const TRIAGE_TARGET_PREFIX: &str = "oncall";

/// Event data sent to the rendering layer
#[derive(Debug, Clone, serde::Serialize)]
pub struct TriageEvent {
    /// Event target (e.g., "oncall::triage")
    pub target: String,
    /// Log level (INFO, DEBUG, WARN, ERROR)
    pub level: String,
    /// Human-readable message
    pub message: String,
    /// Structured fields from the event (session_id, stage, ticket_key, ...)
    pub fields: HashMap<String, Value>,
    /// Timestamp
    pub timestamp: String,
}

impl TriageEvent {
    /// The `session_id` field, if the event carried one.
    pub fn session_id(&self) -> Option<&str> {
        self.fields.get("session_id").and_then(|v| v.as_str())
    }
}

/// A tracing layer that sends triage events to a channel
pub struct TriageEventLayer {
    sender: mpsc::UnboundedSender<TriageEvent>,
}

impl TriageEventLayer {
    /// Create a new layer with the given channel sender
    pub fn new(sender: mpsc::UnboundedSender<TriageEvent>) -> Self {
        Self { sender }
    }

    /// Creates a layer together with the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<TriageEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self::new(sender), receiver)
    }
}

impl<S> Layer<S> for TriageEventLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let target = event.metadata().target();
        if !target.starts_with(TRIAGE_TARGET_PREFIX) {
            return;
        }

        let mut fields = HashMap::new();
        let mut visitor = FieldVisitor(&mut fields);
        event.record(&mut visitor);

        let message = fields
            .remove("message")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_default();

        let triage_event = TriageEvent {
            target: target.to_string(),
            level: event.metadata().level().to_string(),
            message,
            fields,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        // Receiver gone means nobody is rendering; drop the event.
        let _ = self.sender.send(triage_event);
    }
}

/// Field visitor that extracts tracing event fields into a HashMap
struct FieldVisitor<'a>(&'a mut HashMap<String, Value>);

impl<'a> tracing::field::Visit for FieldVisitor<'a> {
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0
            .insert(field.name().to_string(), serde_json::json!(value));
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.insert(
            field.name().to_string(),
            serde_json::json!(format!("{:?}", value)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_forwards_only_triage_targets() {
        let (layer, mut receiver) = TriageEventLayer::channel();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(
                target: "oncall::triage",
                session_id = "s-1",
                ticket_key = "PROJ-1",
                epoch = 3u64,
                "Ticket fetched"
            );
            tracing::info!(target: "hyper::client", "unrelated");
        });

        let event = receiver.try_recv().expect("triage event forwarded");
        assert_eq!(event.target, "oncall::triage");
        assert_eq!(event.level, "INFO");
        assert_eq!(event.message, "Ticket fetched");
        assert_eq!(event.session_id(), Some("s-1"));
        assert_eq!(event.fields["ticket_key"], "PROJ-1");
        assert_eq!(event.fields["epoch"], 3);
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_dropped_receiver_is_ignored() {
        let (layer, receiver) = TriageEventLayer::channel();
        drop(receiver);
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(target: "oncall::triage", "nobody listening");
        });
    }
}
