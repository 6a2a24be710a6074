//! Ticket Service collaborator.

use async_trait::async_trait;

use super::model::Ticket;
use crate::error::ServiceError;

/// Fetches ticket snapshots from a ticket tracker.
///
/// Implementations may fail for any reason (network, not found, auth); the
/// controller does not distinguish between them.
#[async_trait]
pub trait TicketService: Send + Sync {
    /// Returns the ticket identified by `key`.
    async fn get_ticket(&self, key: &str) -> Result<Ticket, ServiceError>;
}
