//! Placeholder Ticket Service.
//!
//! Stands in for a real ticket tracker: every key resolves to a canned
//! ticket with one log file and one attachment, unless it was registered as
//! missing.

use async_trait::async_trait;
use oncall_core::ServiceError;
use oncall_core::ticket::{Ticket, TicketFile, TicketService};
use std::collections::HashSet;
use std::sync::RwLock;

pub const PLACEHOLDER_LOG_NAME: &str = "dummy_log.txt";
pub const PLACEHOLDER_ATTACHMENT_NAME: &str = "dummy_attachment.png";

#[derive(Debug, Default)]
pub struct PlaceholderTicketService {
    missing: RwLock<HashSet<String>>,
}

impl PlaceholderTicketService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent fetches of `key` fail with `NotFound`.
    pub fn mark_missing(&self, key: impl Into<String>) {
        if let Ok(mut missing) = self.missing.write() {
            missing.insert(key.into());
        }
    }

    fn is_missing(&self, key: &str) -> bool {
        self.missing
            .read()
            .map(|missing| missing.contains(key))
            .unwrap_or(false)
    }

    /// Canned ticket for `key`.
    pub fn placeholder_ticket(key: &str) -> Ticket {
        Ticket {
            key: key.to_string(),
            description: format!("Dummy description for issue {}", key),
            log_files: vec![TicketFile::new(
                PLACEHOLDER_LOG_NAME,
                "text/plain",
                b"Dummy log content.".to_vec(),
            )],
            attachments: vec![TicketFile::new(
                PLACEHOLDER_ATTACHMENT_NAME,
                "image/png",
                b"DummyImageBytes".to_vec(),
            )],
        }
    }
}

#[async_trait]
impl TicketService for PlaceholderTicketService {
    async fn get_ticket(&self, key: &str) -> Result<Ticket, ServiceError> {
        if self.is_missing(key) {
            return Err(ServiceError::not_found(format!("Issue {} does not exist", key)));
        }
        tracing::debug!(target: "oncall::placeholder", ticket_key = key, "Serving placeholder ticket");
        Ok(Self::placeholder_ticket(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use oncall_core::ServiceErrorKind;

    #[tokio::test]
    async fn test_canned_ticket() {
        let service = PlaceholderTicketService::new();
        let ticket = service.get_ticket("PROJ-1").await.unwrap();

        assert_eq!(ticket.key, "PROJ-1");
        assert_eq!(ticket.description, "Dummy description for issue PROJ-1");
        assert_eq!(ticket.log_files[0].name, "dummy_log.txt");
        assert_eq!(ticket.log_files[0].content, b"Dummy log content.");
        assert_eq!(ticket.attachments[0].name, "dummy_attachment.png");
        assert_eq!(ticket.attachments[0].content, b"DummyImageBytes");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let service = PlaceholderTicketService::new();
        service.mark_missing("PROJ-404");

        let err = service.get_ticket("PROJ-404").await.unwrap_err();
        assert_eq!(err.kind, ServiceErrorKind::NotFound);
        assert!(service.get_ticket("PROJ-405").await.is_ok());
    }
}
