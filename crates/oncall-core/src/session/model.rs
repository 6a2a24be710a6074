//! Session domain model.
//!
//! `Session` holds everything one user's wizard run needs and implements the
//! synchronous half of every transition. Collaborator calls happen outside of
//! it; their results are applied through the methods below, each of which
//! either succeeds completely or leaves the session untouched.

use std::sync::Arc;

use super::stage::Stage;
use super::view::{UploadSlot, UploadState, ViewModel};
use crate::analysis::Analysis;
use crate::config::{OverflowPolicy, UploadSettings};
use crate::error::{AnalyzeError, UploadError};
use crate::ticket::Ticket;
use crate::upload::{UploadCategory, UploadReceipt, UploadedFile};

/// What a successful ticket fetch changed besides the ticket itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketChange {
    /// The key differs from the previous one.
    pub switched: bool,
    /// Stage advanced from `Entry` to `Detail`.
    pub advanced: bool,
    /// A previous analysis was dropped because of the switch.
    pub cleared_analysis: bool,
}

/// Inputs for the Analysis Service, captured under the session lock.
#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub ticket_key: String,
    pub ticket: Arc<Ticket>,
    pub logs: Arc<[UploadedFile]>,
    pub attachments: Arc<[UploadedFile]>,
}

/// The entire mutable state of one user's triage run.
#[derive(Debug, Clone)]
pub struct Session {
    stage: Stage,
    /// Key of the last successfully fetched ticket, empty before the first fetch.
    ticket_key: String,
    ticket: Option<Arc<Ticket>>,
    analysis: Option<Arc<Analysis>>,
    /// Ticket key the current analysis was computed for.
    analysis_ticket_key: Option<String>,
    pending_logs: Arc<[UploadedFile]>,
    pending_attachments: Arc<[UploadedFile]>,
    /// Bumped on every ticket switch so upload widgets get a fresh identity.
    upload_epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            stage: Stage::Entry,
            ticket_key: String::new(),
            ticket: None,
            analysis: None,
            analysis_ticket_key: None,
            pending_logs: Arc::from(Vec::new()),
            pending_attachments: Arc::from(Vec::new()),
            upload_epoch: 0,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn ticket_key(&self) -> &str {
        &self.ticket_key
    }

    pub fn ticket(&self) -> Option<&Ticket> {
        self.ticket.as_deref()
    }

    pub fn analysis(&self) -> Option<&Analysis> {
        self.analysis.as_deref()
    }

    pub fn upload_epoch(&self) -> u64 {
        self.upload_epoch
    }

    pub fn pending(&self, category: UploadCategory) -> &[UploadedFile] {
        match category {
            UploadCategory::Logs => &self.pending_logs,
            UploadCategory::Attachments => &self.pending_attachments,
        }
    }

    /// Installs a freshly fetched ticket.
    ///
    /// Switching to a different key bumps the upload epoch and empties both
    /// pending upload lists. The stage leaves `Entry` on the first fetch and is
    /// otherwise left alone. The stored ticket always carries the requested
    /// key, even if the service returned a normalized spelling.
    pub fn apply_ticket(
        &mut self,
        key: &str,
        mut ticket: Ticket,
        clear_analysis_on_switch: bool,
    ) -> TicketChange {
        let switched = self.ticket_key != key;
        let mut cleared_analysis = false;

        if switched {
            self.upload_epoch += 1;
            self.pending_logs = Arc::from(Vec::new());
            self.pending_attachments = Arc::from(Vec::new());
            if clear_analysis_on_switch && self.analysis.is_some() {
                self.analysis = None;
                self.analysis_ticket_key = None;
                cleared_analysis = true;
            }
        }

        if ticket.key != key {
            ticket.key = key.to_string();
        }
        self.ticket = Some(Arc::new(ticket));
        self.ticket_key = key.to_string();

        let advanced = self.stage == Stage::Entry;
        if advanced {
            self.stage = Stage::Detail;
        }

        TicketChange {
            switched,
            advanced,
            cleared_analysis,
        }
    }

    /// Records a file selection for `category`.
    ///
    /// An empty selection keeps the previous one. A non-empty selection
    /// replaces it wholesale, capped at the category limit.
    pub fn record_upload(
        &mut self,
        category: UploadCategory,
        files: Vec<UploadedFile>,
        settings: &UploadSettings,
    ) -> Result<UploadReceipt, UploadError> {
        if self.ticket.is_none() {
            return Err(UploadError::NoTicket);
        }

        if files.is_empty() {
            return Ok(UploadReceipt {
                category,
                accepted: self.pending(category).len(),
                dropped: Vec::new(),
                kept_previous: true,
            });
        }

        if settings.enforce_allow_list {
            if let Some(bad) = files.iter().find(|f| !category.allows(&f.name)) {
                return Err(UploadError::DisallowedExtension {
                    category,
                    name: bad.name.clone(),
                    allowed: category.allowed_display(),
                });
            }
        }

        let limit = settings.limit(category);
        let mut files = files;
        let dropped: Vec<String> = if files.len() > limit {
            if settings.overflow == OverflowPolicy::Reject {
                return Err(UploadError::TooManyFiles {
                    category,
                    limit,
                    received: files.len(),
                });
            }
            files.split_off(limit).into_iter().map(|f| f.name).collect()
        } else {
            Vec::new()
        };

        let accepted = files.len();
        let files: Arc<[UploadedFile]> = Arc::from(files);
        match category {
            UploadCategory::Logs => self.pending_logs = files,
            UploadCategory::Attachments => self.pending_attachments = files,
        }

        Ok(UploadReceipt {
            category,
            accepted,
            dropped,
            kept_previous: false,
        })
    }

    /// Like [`Session::record_upload`], but refuses selections from a widget
    /// created under an older upload epoch.
    pub fn record_upload_for_epoch(
        &mut self,
        epoch: u64,
        category: UploadCategory,
        files: Vec<UploadedFile>,
        settings: &UploadSettings,
    ) -> Result<UploadReceipt, UploadError> {
        if self.ticket.is_some() && epoch != self.upload_epoch {
            return Err(UploadError::StaleEpoch {
                submitted: epoch,
                current: self.upload_epoch,
            });
        }
        self.record_upload(category, files, settings)
    }

    /// Checks the analyze preconditions and snapshots what the Analysis
    /// Service needs.
    pub fn analysis_input(&self) -> Result<AnalysisInput, AnalyzeError> {
        if self.ticket_key.is_empty() {
            return Err(AnalyzeError::MissingTicketKey);
        }
        let ticket = self
            .ticket
            .clone()
            .ok_or(AnalyzeError::TicketFetchIncomplete)?;

        Ok(AnalysisInput {
            ticket_key: self.ticket_key.clone(),
            ticket,
            logs: Arc::clone(&self.pending_logs),
            attachments: Arc::clone(&self.pending_attachments),
        })
    }

    /// Stores an analysis result and moves to `Results`.
    ///
    /// Returns true if the stage changed.
    pub fn apply_analysis(&mut self, ticket_key: &str, analysis: Analysis) -> bool {
        self.analysis = Some(Arc::new(analysis));
        self.analysis_ticket_key = Some(ticket_key.to_string());

        let advanced = self.stage != Stage::Results;
        self.stage = Stage::Results;
        advanced
    }

    /// Immutable snapshot for the rendering layer.
    pub fn view(&self, settings: &UploadSettings) -> ViewModel {
        ViewModel {
            stage: self.stage,
            ticket_key: self.ticket_key.clone(),
            ticket: self.ticket.clone(),
            analysis: self.analysis.clone(),
            analysis_ticket_key: self.analysis_ticket_key.clone(),
            uploads: UploadState {
                epoch: self.upload_epoch,
                logs: UploadSlot {
                    files: Arc::clone(&self.pending_logs),
                    limit: settings.limit(UploadCategory::Logs),
                },
                attachments: UploadSlot {
                    files: Arc::clone(&self.pending_attachments),
                    limit: settings.limit(UploadCategory::Attachments),
                },
            },
        }
    }
}
