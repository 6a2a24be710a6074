use oncall_core::analysis::AnalysisService;
use oncall_core::config::TriageConfig;
use oncall_core::ticket::TicketService;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::controller::TriageController;

/// Keeps one [`TriageController`] per user session.
///
/// Sessions share the collaborator handles and configuration but no state;
/// each controller owns its own `Session`.
pub struct TriageSessionManager {
    /// In-memory session registry
    sessions: Arc<RwLock<HashMap<String, Arc<TriageController>>>>,
    ticket_service: Arc<dyn TicketService>,
    analysis_service: Arc<dyn AnalysisService>,
    config: TriageConfig,
}

impl TriageSessionManager {
    pub fn new(
        ticket_service: Arc<dyn TicketService>,
        analysis_service: Arc<dyn AnalysisService>,
        config: TriageConfig,
    ) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ticket_service,
            analysis_service,
            config,
        }
    }

    /// Starts a new session with a generated UUID.
    pub async fn create_session(&self) -> Arc<TriageController> {
        let session_id = Uuid::new_v4().to_string();
        let controller = Arc::new(TriageController::new(
            session_id.clone(),
            Arc::clone(&self.ticket_service),
            Arc::clone(&self.analysis_service),
            self.config.clone(),
        ));

        let mut sessions = self.sessions.write().await;
        sessions.insert(session_id.clone(), Arc::clone(&controller));

        tracing::info!(
            target: "oncall::sessions",
            session_id = %session_id,
            active = sessions.len() as u64,
            "Session started"
        );

        controller
    }

    /// Returns the controller for `session_id`, if it is still open.
    pub async fn get(&self, session_id: &str) -> Option<Arc<TriageController>> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Closes a session and forgets it.
    ///
    /// Returns `false` if no such session was open.
    pub async fn close_session(&self, session_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(session_id);
        match removed {
            Some(controller) => {
                controller.close();
                true
            }
            None => false,
        }
    }

    /// Closes every open session.
    pub async fn close_all(&self) {
        let drained: Vec<_> = self.sessions.write().await.drain().collect();
        for (_, controller) in drained {
            controller.close();
        }
    }

    pub async fn session_ids(&self) -> Vec<String> {
        let sessions = self.sessions.read().await;
        sessions.keys().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncall_core::ServiceError;
    use oncall_core::analysis::Analysis;
    use oncall_core::session::Stage;
    use oncall_core::ticket::Ticket;
    use oncall_core::upload::UploadedFile;

    struct StubTickets;

    #[async_trait::async_trait]
    impl TicketService for StubTickets {
        async fn get_ticket(&self, key: &str) -> Result<Ticket, ServiceError> {
            Ok(Ticket {
                key: key.to_string(),
                description: "stub".to_string(),
                log_files: Vec::new(),
                attachments: Vec::new(),
            })
        }
    }

    struct StubAnalysis;

    #[async_trait::async_trait]
    impl AnalysisService for StubAnalysis {
        async fn analyze(
            &self,
            _ticket: &Ticket,
            _logs: &[UploadedFile],
            _attachments: &[UploadedFile],
        ) -> Result<Analysis, ServiceError> {
            Ok(Analysis {
                summary: "s".to_string(),
                root_cause: "r".to_string(),
                solution: "f".to_string(),
            })
        }
    }

    fn manager() -> TriageSessionManager {
        TriageSessionManager::new(
            Arc::new(StubTickets),
            Arc::new(StubAnalysis),
            TriageConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let manager = manager();
        let first = manager.create_session().await;
        let second = manager.create_session().await;
        assert_ne!(first.session_id(), second.session_id());

        first.fetch_ticket("PROJ-1").await.unwrap();

        assert_eq!(first.current_view().await.stage, Stage::Detail);
        assert_eq!(second.current_view().await.stage, Stage::Entry);
        assert_eq!(manager.len().await, 2);
    }

    #[tokio::test]
    async fn test_get_and_close() {
        let manager = manager();
        let controller = manager.create_session().await;
        let id = controller.session_id().to_string();

        assert!(manager.get(&id).await.is_some());
        assert!(manager.close_session(&id).await);
        assert!(controller.is_closed());
        assert!(manager.get(&id).await.is_none());
        assert!(!manager.close_session(&id).await);
    }

    #[tokio::test]
    async fn test_close_all() {
        let manager = manager();
        let a = manager.create_session().await;
        let b = manager.create_session().await;

        manager.close_all().await;

        assert!(manager.is_empty().await);
        assert!(a.is_closed() && b.is_closed());
        assert!(manager.session_ids().await.is_empty());
    }
}
