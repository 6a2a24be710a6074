//! Turns raw user selections into `UploadedFile`s.
//!
//! The rendering layer hands over names and bytes (or paths on disk); this
//! module infers MIME types and applies the per-category allow-list before
//! anything reaches the controller.

use anyhow::{Context, Result};
use oncall_core::upload::{UploadCategory, UploadedFile};
use std::path::Path;

/// Infers the MIME type from a filename extension using the `mime_guess` library.
fn infer_mime_type(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .to_string()
}

/// Result of filtering a selection against a category allow-list.
#[derive(Debug, Default)]
pub struct Intake {
    pub accepted: Vec<UploadedFile>,
    /// Names that did not match the allow-list.
    pub rejected: Vec<String>,
}

pub struct UploadIntake;

impl UploadIntake {
    /// Builds an `UploadedFile` from in-memory content.
    pub fn from_bytes(name: impl Into<String>, content: Vec<u8>) -> UploadedFile {
        let name = name.into();
        let mime_type = infer_mime_type(&name);
        UploadedFile::new(name, mime_type, content)
    }

    /// Reads a file from disk, using its file name as the upload name.
    pub async fn from_path(path: &Path) -> Result<UploadedFile> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("Invalid file name: {}", path.display()))?
            .to_string();
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Self::from_bytes(name, content))
    }

    /// Splits `files` into those the category accepts and those it does not.
    pub fn filter(category: UploadCategory, files: Vec<UploadedFile>) -> Intake {
        let (accepted, rejected): (Vec<_>, Vec<_>) =
            files.into_iter().partition(|f| category.allows(&f.name));
        Intake {
            accepted,
            rejected: rejected.into_iter().map(|f| f.name).collect(),
        }
    }
}
