//! Last-request-wins tracking.
//!
//! Every fetch or analyze call takes a [`RequestHandle`] before it awaits its
//! collaborator. When the result comes back, it may only be applied if no
//! newer request of the same operation has started in the meantime.

use std::sync::atomic::{AtomicU64, Ordering};

/// Operations whose requests can supersede each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchTicket,
    Analyze,
}

/// Identity of one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestHandle {
    pub operation: Operation,
    pub generation: u64,
}

/// Generation counters, one per [`Operation`].
#[derive(Debug, Default)]
pub struct RequestTracker {
    fetch: AtomicU64,
    analyze: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn counter(&self, operation: Operation) -> &AtomicU64 {
        match operation {
            Operation::FetchTicket => &self.fetch,
            Operation::Analyze => &self.analyze,
        }
    }

    /// Starts a new request, superseding any earlier one of the same operation.
    pub fn begin(&self, operation: Operation) -> RequestHandle {
        let generation = self.counter(operation).fetch_add(1, Ordering::AcqRel) + 1;
        RequestHandle {
            operation,
            generation,
        }
    }

    /// Returns true if `handle` is still the latest request of its operation.
    ///
    /// Callers check this while holding the session write lock, so the check
    /// and the state update happen together.
    pub fn is_current(&self, handle: &RequestHandle) -> bool {
        self.counter(handle.operation).load(Ordering::Acquire) == handle.generation
    }
}
