//! Read-only projection of a session for the rendering layer.

use serde::Serialize;
use std::sync::Arc;
use strum::IntoEnumIterator;

use super::stage::Stage;
use crate::analysis::{Analysis, AnalysisPanel, PanelKind};
use crate::ticket::Ticket;
use crate::upload::{UploadCategory, UploadedFile};

/// Pending files for one upload widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadSlot {
    pub files: Arc<[UploadedFile]>,
    pub limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadState {
    /// Version counter for upload widget identity.
    pub epoch: u64,
    pub logs: UploadSlot,
    pub attachments: UploadSlot,
}

/// Immutable snapshot of a session.
///
/// Shared data is held behind `Arc` and never mutated after it is stored in
/// the session, so handing out a `ViewModel` gives the renderer no way back
/// into session state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewModel {
    pub stage: Stage,
    /// Current ticket key; prefills the key input on the results page.
    pub ticket_key: String,
    pub ticket: Option<Arc<Ticket>>,
    pub analysis: Option<Arc<Analysis>>,
    /// Ticket key the analysis was computed for.
    pub analysis_ticket_key: Option<String>,
    pub uploads: UploadState,
}

impl ViewModel {
    pub fn pending(&self, category: UploadCategory) -> &[UploadedFile] {
        &self.slot(category).files
    }

    pub fn slot(&self, category: UploadCategory) -> &UploadSlot {
        match category {
            UploadCategory::Logs => &self.uploads.logs,
            UploadCategory::Attachments => &self.uploads.attachments,
        }
    }

    /// Widget identity for an upload picker; changes on every ticket switch.
    pub fn upload_widget_key(&self, category: UploadCategory) -> String {
        format!("{}-{}", category, self.uploads.epoch)
    }

    /// Label for an upload picker, using the configured cap.
    pub fn upload_label(&self, category: UploadCategory) -> String {
        category.label(self.slot(category).limit)
    }

    /// True when the analysis on display belongs to a different ticket than
    /// the one currently loaded.
    pub fn analysis_is_stale(&self) -> bool {
        match (&self.analysis, &self.analysis_ticket_key) {
            (Some(_), Some(key)) => key != &self.ticket_key,
            _ => false,
        }
    }

    /// Summary, Root Cause and Solution panels, in display order.
    pub fn panels(&self) -> Vec<AnalysisPanel> {
        PanelKind::iter()
            .map(|kind| AnalysisPanel::build(kind, self.analysis.as_deref()))
            .collect()
    }
}
