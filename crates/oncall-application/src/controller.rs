//! Triage Session Controller.
//!
//! The only component allowed to mutate a [`Session`]. Each public operation
//! corresponds to one user action; collaborator calls run outside the session
//! lock and their results are applied only if no newer request of the same
//! kind has started meanwhile.

use std::sync::Arc;

use oncall_core::analysis::AnalysisService;
use oncall_core::config::TriageConfig;
use oncall_core::session::{Session, ViewModel};
use oncall_core::ticket::TicketService;
use oncall_core::upload::{UploadCategory, UploadReceipt, UploadedFile};
use oncall_core::{AnalyzeError, FetchError, UploadError};
use oncall_execution::{Operation, RequestTracker, ServiceExecutor};
use tokio::sync::RwLock;

/// Drives one user's triage wizard.
pub struct TriageController {
    session_id: String,
    session: RwLock<Session>,
    ticket_service: Arc<dyn TicketService>,
    analysis_service: Arc<dyn AnalysisService>,
    config: TriageConfig,
    requests: RequestTracker,
    executor: ServiceExecutor,
}

impl TriageController {
    /// Creates a controller with a fresh session at stage `Entry`.
    pub fn new(
        session_id: impl Into<String>,
        ticket_service: Arc<dyn TicketService>,
        analysis_service: Arc<dyn AnalysisService>,
        config: TriageConfig,
    ) -> Self {
        let executor = ServiceExecutor::new(config.services.timeout());
        Self {
            session_id: session_id.into(),
            session: RwLock::new(Session::new()),
            ticket_service,
            analysis_service,
            config,
            requests: RequestTracker::new(),
            executor,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Fetches `key` from the Ticket Service and makes it the current ticket.
    ///
    /// # Errors
    ///
    /// - `EmptyKey` if `key` is empty
    /// - `TicketService` if the collaborator fails, times out, or the session is closed
    /// - `Superseded` if another fetch started while this one was in flight
    ///
    /// The session is unchanged on every error.
    pub async fn fetch_ticket(&self, key: &str) -> Result<(), FetchError> {
        if key.is_empty() {
            return Err(FetchError::EmptyKey);
        }

        let request = self.requests.begin(Operation::FetchTicket);
        let ticket = self
            .executor
            .run(self.ticket_service.get_ticket(key))
            .await
            .map_err(FetchError::TicketService)?;

        let mut session = self.session.write().await;
        if !self.requests.is_current(&request) {
            return Err(FetchError::Superseded);
        }

        if ticket.key != key {
            tracing::debug!(
                target: "oncall::triage",
                session_id = %self.session_id,
                requested = key,
                returned = %ticket.key,
                "Ticket service returned a different key spelling"
            );
        }
        let change = session.apply_ticket(
            key,
            ticket,
            self.config.session.clear_analysis_on_ticket_switch,
        );

        if change.switched {
            tracing::info!(
                target: "oncall::triage",
                session_id = %self.session_id,
                ticket_key = key,
                epoch = session.upload_epoch(),
                cleared_analysis = change.cleared_analysis,
                "Switched ticket"
            );
        } else {
            tracing::debug!(
                target: "oncall::triage",
                session_id = %self.session_id,
                ticket_key = key,
                "Refreshed ticket"
            );
        }
        if change.advanced {
            tracing::info!(
                target: "oncall::triage",
                session_id = %self.session_id,
                stage = %session.stage(),
                "Stage advanced"
            );
        }

        Ok(())
    }

    /// Records a file selection from one of the upload widgets.
    ///
    /// An empty selection keeps whatever was recorded before. Oversized
    /// selections are truncated to the category cap and the receipt lists the
    /// dropped names, unless the overflow policy is `reject`.
    pub async fn record_upload(
        &self,
        category: UploadCategory,
        files: Vec<UploadedFile>,
    ) -> Result<UploadReceipt, UploadError> {
        let mut session = self.session.write().await;
        let receipt = session.record_upload(category, files, &self.config.uploads)?;
        self.log_receipt(&receipt);
        Ok(receipt)
    }

    /// Like [`TriageController::record_upload`], but rejects selections made
    /// in a widget rendered for an older upload epoch.
    pub async fn record_upload_for_epoch(
        &self,
        epoch: u64,
        category: UploadCategory,
        files: Vec<UploadedFile>,
    ) -> Result<UploadReceipt, UploadError> {
        let mut session = self.session.write().await;
        let receipt =
            session.record_upload_for_epoch(epoch, category, files, &self.config.uploads)?;
        self.log_receipt(&receipt);
        Ok(receipt)
    }

    fn log_receipt(&self, receipt: &UploadReceipt) {
        tracing::debug!(
            target: "oncall::triage",
            session_id = %self.session_id,
            category = %receipt.category,
            accepted = receipt.accepted as u64,
            dropped = receipt.dropped.len() as u64,
            kept_previous = receipt.kept_previous,
            "Recorded upload selection"
        );
    }

    /// Runs the Analysis Service over the current ticket and pending uploads.
    ///
    /// Re-running while already at `Results` overwrites the previous result.
    ///
    /// # Errors
    ///
    /// - `MissingTicketKey` if no ticket key has been set
    /// - `TicketFetchIncomplete` if the key is set but details are missing
    /// - `AnalysisService` if the collaborator fails, times out, or the session is closed
    /// - `Superseded` if another analysis started while this one was in flight
    /// - `TicketSwitched` if results are cleared on ticket switches and the
    ///   ticket changed while this analysis was in flight
    pub async fn analyze(&self) -> Result<(), AnalyzeError> {
        let input = self.session.read().await.analysis_input()?;

        let request = self.requests.begin(Operation::Analyze);
        let analysis = self
            .executor
            .run(
                self.analysis_service
                    .analyze(&input.ticket, &input.logs, &input.attachments),
            )
            .await
            .map_err(AnalyzeError::AnalysisService)?;

        let mut session = self.session.write().await;
        if !self.requests.is_current(&request) {
            return Err(AnalyzeError::Superseded);
        }
        if self.config.session.clear_analysis_on_ticket_switch
            && session.ticket_key() != input.ticket_key
        {
            return Err(AnalyzeError::TicketSwitched {
                analyzed: input.ticket_key,
                current: session.ticket_key().to_string(),
            });
        }

        let advanced = session.apply_analysis(&input.ticket_key, analysis);
        tracing::info!(
            target: "oncall::triage",
            session_id = %self.session_id,
            ticket_key = %input.ticket_key,
            logs = input.logs.len() as u64,
            attachments = input.attachments.len() as u64,
            rerun = !advanced,
            "Analysis completed"
        );

        Ok(())
    }

    /// Immutable snapshot for the rendering layer.
    pub async fn current_view(&self) -> ViewModel {
        self.session.read().await.view(&self.config.uploads)
    }

    /// Tears the session down; in-flight collaborator calls are cancelled.
    pub fn close(&self) {
        self.executor.shutdown();
        tracing::info!(
            target: "oncall::triage",
            session_id = %self.session_id,
            "Session closed"
        );
    }

    pub fn is_closed(&self) -> bool {
        self.executor.is_shut_down()
    }
}
