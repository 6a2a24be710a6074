//! Execution policy for collaborator calls.
//!
//! - `executor`: bounded-time, cancellable execution of a service future
//! - `request`: last-request-wins bookkeeping per operation
//! - `tracing_layer`: forwards triage events to the rendering layer

pub mod executor;
pub mod request;
pub mod tracing_layer;

pub use executor::ServiceExecutor;
pub use request::{Operation, RequestHandle, RequestTracker};
pub use tracing_layer::{TriageEvent, TriageEventLayer};
