//! Placeholder Analysis Service.
//!
//! Returns fixed text; repeated runs for the same ticket are marked
//! `(re-run)` so the user can tell a refresh happened.

use async_trait::async_trait;
use oncall_core::ServiceError;
use oncall_core::analysis::{Analysis, AnalysisService};
use oncall_core::ticket::Ticket;
use oncall_core::upload::UploadedFile;
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct PlaceholderAnalysisService {
    /// Completed runs per ticket key.
    runs: Mutex<HashMap<String, u32>>,
}

impl PlaceholderAnalysisService {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_run(&self, key: &str) -> u32 {
        let mut runs = self.runs.lock().unwrap_or_else(PoisonError::into_inner);
        let count = runs.entry(key.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    pub fn placeholder_analysis(rerun: bool) -> Analysis {
        let suffix = if rerun { " (re-run)" } else { "" };
        Analysis {
            summary: format!("Dummy analysis summary{}.", suffix),
            root_cause: format!("Dummy root cause identified{}.", suffix),
            solution: format!("Dummy proposed solution{}.", suffix),
        }
    }
}

#[async_trait]
impl AnalysisService for PlaceholderAnalysisService {
    async fn analyze(
        &self,
        ticket: &Ticket,
        logs: &[UploadedFile],
        attachments: &[UploadedFile],
    ) -> Result<Analysis, ServiceError> {
        let run = self.next_run(&ticket.key);
        tracing::debug!(
            target: "oncall::placeholder",
            ticket_key = %ticket.key,
            run,
            logs = logs.len() as u64,
            attachments = attachments.len() as u64,
            "Serving placeholder analysis"
        );
        Ok(Self::placeholder_analysis(run > 1))
    }
}
