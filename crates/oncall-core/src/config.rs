//! Configuration structures for the triage controller.
//!
//! The defaults keep up to 15 log files and 10 attachments, truncate on
//! overflow, and let analysis results survive a ticket switch.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::upload::UploadCategory;

/// Root configuration, read from `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct TriageConfig {
    pub uploads: UploadSettings,
    pub services: ServiceSettings,
    pub session: SessionSettings,
    pub logging: LoggingConfig,
}

/// What to do with a selection larger than the category cap.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OverflowPolicy {
    /// Keep the first `limit` files and report the rest.
    #[default]
    Truncate,
    /// Refuse the whole selection.
    Reject,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct UploadSettings {
    pub max_log_files: usize,
    pub max_attachment_files: usize,
    /// Re-check file extensions against the category allow-list.
    pub enforce_allow_list: bool,
    pub overflow: OverflowPolicy,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_log_files: UploadCategory::Logs.default_limit(),
            max_attachment_files: UploadCategory::Attachments.default_limit(),
            enforce_allow_list: true,
            overflow: OverflowPolicy::Truncate,
        }
    }
}

impl UploadSettings {
    pub fn limit(&self, category: UploadCategory) -> usize {
        match category {
            UploadCategory::Logs => self.max_log_files,
            UploadCategory::Attachments => self.max_attachment_files,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ServiceSettings {
    /// Upper bound for a single Ticket Service or Analysis Service call.
    pub timeout_secs: u64,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl ServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct SessionSettings {
    /// Drop the previous analysis when a different ticket is fetched.
    pub clear_analysis_on_ticket_switch: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
    /// Forward triage events to the rendering layer over a channel.
    pub forward_events: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            forward_events: false,
        }
    }
}
