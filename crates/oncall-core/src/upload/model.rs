use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which upload widget a selection came from.
///
/// Each category has its own extension allow-list and file cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UploadCategory {
    Logs,
    Attachments,
}

impl UploadCategory {
    /// Extensions (lowercase, without the dot) accepted for this category.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            UploadCategory::Logs => &["txt", "log"],
            UploadCategory::Attachments => &["png", "jpg", "jpeg", "pdf"],
        }
    }

    /// Cap used when no configuration overrides it.
    pub fn default_limit(self) -> usize {
        match self {
            UploadCategory::Logs => 15,
            UploadCategory::Attachments => 10,
        }
    }

    /// Widget label shown above the file picker.
    pub fn label(self, limit: usize) -> String {
        match self {
            UploadCategory::Logs => format!("Upload New Logs (max {} files)", limit),
            UploadCategory::Attachments => {
                format!("Upload New Attachments (max {} files)", limit)
            }
        }
    }

    /// Returns true if `file_name` carries an extension from the allow-list.
    ///
    /// Comparison is case-insensitive; names without an extension never match.
    pub fn allows(self, file_name: &str) -> bool {
        Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_ascii_lowercase();
                self.allowed_extensions().contains(&ext.as_str())
            })
            .unwrap_or(false)
    }

    /// Allow-list rendered for messages, e.g. `.txt, .log`.
    pub fn allowed_display(self) -> String {
        self.allowed_extensions()
            .iter()
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A user-supplied file awaiting submission alongside the ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Original filename
    pub name: String,
    /// MIME type of the file
    pub mime_type: String,
    /// Raw file content
    #[serde(with = "crate::encoding::base64_bytes")]
    pub content: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            content,
        }
    }

    /// File size in bytes
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_allow_list() {
        assert!(UploadCategory::Logs.allows("server.log"));
        assert!(UploadCategory::Logs.allows("notes.TXT"));
        assert!(!UploadCategory::Logs.allows("screenshot.png"));
        assert!(!UploadCategory::Logs.allows("Makefile"));
    }

    #[test]
    fn test_attachment_allow_list() {
        for name in ["a.png", "b.jpg", "c.JPEG", "d.pdf"] {
            assert!(UploadCategory::Attachments.allows(name), "{name}");
        }
        assert!(!UploadCategory::Attachments.allows("trace.log"));
        assert!(!UploadCategory::Attachments.allows("archive.pdf.zip"));
    }

    #[test]
    fn test_labels_use_limit() {
        assert_eq!(
            UploadCategory::Logs.label(15),
            "Upload New Logs (max 15 files)"
        );
        assert_eq!(
            UploadCategory::Attachments.label(3),
            "Upload New Attachments (max 3 files)"
        );
    }

    #[test]
    fn test_category_display() {
        assert_eq!(UploadCategory::Logs.to_string(), "logs");
        assert_eq!(UploadCategory::Attachments.to_string(), "attachments");
        assert_eq!(UploadCategory::Attachments.allowed_display(), ".png, .jpg, .jpeg, .pdf");
    }
}
