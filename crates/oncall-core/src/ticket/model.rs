//! Ticket domain model.

use serde::{Deserialize, Serialize};

/// Whether a ticket file was attached as a log or as a general attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketFileKind {
    Log,
    Attachment,
}

impl TicketFileKind {
    /// MIME type offered when the user downloads the file.
    pub fn download_mime(self) -> &'static str {
        match self {
            TicketFileKind::Log => "text/plain",
            TicketFileKind::Attachment => "application/octet-stream",
        }
    }
}

/// A file stored on the ticket in the ticket tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFile {
    pub name: String,
    pub mime_type: String,
    #[serde(with = "crate::encoding::base64_bytes")]
    pub content: Vec<u8>,
}

/// Payload handed to a download button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDownload {
    pub file_name: String,
    pub mime: String,
    #[serde(with = "crate::encoding::base64_bytes")]
    pub data: Vec<u8>,
}

impl TicketFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    pub fn download(&self, kind: TicketFileKind) -> FileDownload {
        FileDownload {
            file_name: self.name.clone(),
            mime: kind.download_mime().to_string(),
            data: self.content.clone(),
        }
    }
}

/// Read-only snapshot of ticket-tracker data.
///
/// A ticket is replaced wholesale on every successful fetch and never
/// mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Ticket key (e.g. "PROJ-1")
    pub key: String,
    pub description: String,
    /// Log files in tracker order
    #[serde(default)]
    pub log_files: Vec<TicketFile>,
    /// Attachments in tracker order
    #[serde(default)]
    pub attachments: Vec<TicketFile>,
}

impl Ticket {
    /// Download payloads for every file on the ticket, logs first.
    pub fn downloads(&self) -> Vec<FileDownload> {
        self.log_files
            .iter()
            .map(|f| f.download(TicketFileKind::Log))
            .chain(
                self.attachments
                    .iter()
                    .map(|f| f.download(TicketFileKind::Attachment)),
            )
            .collect()
    }
}
