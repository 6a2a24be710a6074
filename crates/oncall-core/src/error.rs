//! Error types for the triage session controller.
//!
//! Each controller operation has its own error enum so that the rendering
//! layer can match exhaustively on what a given action can produce. All of
//! them are recoverable: a failed call leaves the session exactly as it was.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::upload::UploadCategory;

/// Coarse classification of a collaborator failure.
///
/// The controller never branches on the kind; it is carried through so the
/// rendering layer can choose a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceErrorKind {
    NotFound,
    Unauthorized,
    Unavailable,
    Timeout,
    Cancelled,
    Other,
}

/// Failure reported by the Ticket Service or the Analysis Service.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind:?}: {message}")]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub message: String,
}

impl ServiceError {
    pub fn new(kind: ServiceErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::NotFound, message)
    }

    /// Creates an Unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ServiceErrorKind::Unavailable, message)
    }

    /// Creates a Timeout error for a call that exceeded `limit`
    pub fn timeout(limit: Duration) -> Self {
        Self::new(
            ServiceErrorKind::Timeout,
            format!("request timed out after {}ms", limit.as_millis()),
        )
    }

    /// Creates a Cancelled error (session torn down mid-request)
    pub fn cancelled() -> Self {
        Self::new(ServiceErrorKind::Cancelled, "session closed")
    }

    pub fn is_timeout(&self) -> bool {
        self.kind == ServiceErrorKind::Timeout
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ServiceErrorKind::Cancelled
    }
}

/// Errors returned by `fetch_ticket`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Please enter a Jira issue key.")]
    EmptyKey,

    #[error("Ticket service error: {0}")]
    TicketService(#[source] ServiceError),

    /// A newer fetch was started while this one was in flight.
    #[error("Fetch superseded by a newer request")]
    Superseded,
}

/// Errors returned by `record_upload`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("No ticket has been fetched yet")]
    NoTicket,

    #[error("Too many files for {category}: received {received}, limit is {limit}")]
    TooManyFiles {
        category: UploadCategory,
        limit: usize,
        received: usize,
    },

    #[error("File '{name}' is not an allowed {category} type (allowed: {allowed})")]
    DisallowedExtension {
        category: UploadCategory,
        name: String,
        allowed: String,
    },

    /// The selection came from an upload widget created before the last ticket switch.
    #[error("Upload widget is stale (epoch {submitted}, current {current})")]
    StaleEpoch { submitted: u64, current: u64 },
}

/// Errors returned by `analyze`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("No Jira issue key has been entered")]
    MissingTicketKey,

    #[error("Ticket details have not been fetched")]
    TicketFetchIncomplete,

    #[error("Analysis service error: {0}")]
    AnalysisService(#[source] ServiceError),

    /// A newer analysis was started while this one was in flight.
    #[error("Analysis superseded by a newer request")]
    Superseded,

    /// The ticket changed while the analysis was in flight and results are
    /// cleared on ticket switches.
    #[error("Analysis for {analyzed} discarded; current ticket is {current}")]
    TicketSwitched { analyzed: String, current: String },
}

impl FetchError {
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

impl AnalyzeError {
    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}
