use serde::{Deserialize, Serialize};

/// Wizard stage of a triage session.
///
/// Stages only move forward: `Entry -> Detail` on the first successful fetch,
/// `Detail -> Results` on the first successful analysis.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    /// No ticket fetched yet.
    #[default]
    Entry,
    /// Ticket fetched, no analysis completed.
    Detail,
    /// At least one analysis completed.
    Results,
}

impl Stage {
    /// One-based page number of the three-page wizard.
    pub fn page(self) -> u8 {
        match self {
            Stage::Entry => 1,
            Stage::Detail => 2,
            Stage::Results => 3,
        }
    }
}
