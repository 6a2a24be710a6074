use serde::{Deserialize, Serialize};

use super::UploadCategory;

/// Outcome of a recorded upload selection.
///
/// When a selection exceeds the category cap and the overflow policy is
/// truncation, the excess names end up in `dropped` instead of vanishing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub category: UploadCategory,
    /// Number of files now pending for the category.
    pub accepted: usize,
    /// Names of files cut off by the cap, in selection order.
    pub dropped: Vec<String>,
    /// True when the selection was empty and the previous one was kept.
    pub kept_previous: bool,
}

impl UploadReceipt {
    pub fn is_truncated(&self) -> bool {
        !self.dropped.is_empty()
    }

    /// Inline warning for the rendering layer, if the selection was cut.
    pub fn warning(&self) -> Option<String> {
        if !self.is_truncated() {
            return None;
        }
        Some(format!(
            "Only the first {} {} files were kept; ignored: {}",
            self.accepted,
            self.category,
            self.dropped.join(", ")
        ))
    }
}
