//! Bounded, cancellable execution of collaborator calls.

use std::future::Future;
use std::time::Duration;

use oncall_core::ServiceError;
use tokio_util::sync::CancellationToken;

/// Runs Ticket Service and Analysis Service futures for one session.
///
/// Each call is bounded by `timeout` and abandoned as soon as the session's
/// cancellation token fires.
#[derive(Debug, Clone)]
pub struct ServiceExecutor {
    timeout: Duration,
    shutdown: CancellationToken,
}

impl ServiceExecutor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Cancels every in-flight and future call.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Drives `call` to completion, a timeout, or session teardown.
    pub async fn run<T, F>(&self, call: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        if self.shutdown.is_cancelled() {
            return Err(ServiceError::cancelled());
        }

        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(ServiceError::cancelled()),
            outcome = tokio::time::timeout(self.timeout, call) => match outcome {
                Ok(result) => result,
                Err(_) => Err(ServiceError::timeout(self.timeout)),
            },
        }
    }
}
