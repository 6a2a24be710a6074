use async_trait::async_trait;

use super::model::Analysis;
use crate::error::ServiceError;
use crate::ticket::Ticket;
use crate::upload::UploadedFile;

/// Produces a summary, root cause and solution for a ticket.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Analyzes `ticket` together with the files the user uploaded for it.
    async fn analyze(
        &self,
        ticket: &Ticket,
        logs: &[UploadedFile],
        attachments: &[UploadedFile],
    ) -> Result<Analysis, ServiceError>;
}
