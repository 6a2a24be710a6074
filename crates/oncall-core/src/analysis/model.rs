use serde::{Deserialize, Serialize};

/// Result of an analyze action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub summary: String,
    pub root_cause: String,
    pub solution: String,
}

/// One of the three result panels shown beside the ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Summary,
    RootCause,
    Solution,
}

impl PanelKind {
    pub fn heading(self) -> &'static str {
        match self {
            PanelKind::Summary => "Summary",
            PanelKind::RootCause => "Root Cause",
            PanelKind::Solution => "Solution",
        }
    }

    /// Text shown while no analysis is available.
    pub fn placeholder(self) -> &'static str {
        match self {
            PanelKind::Summary => "*Enter Jira details to get summary*",
            PanelKind::RootCause => "*Enter Jira details to get root cause*",
            PanelKind::Solution => "*Enter Jira details to get solution*",
        }
    }
}

/// A panel ready for display: heading plus either content or placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisPanel {
    pub kind: PanelKind,
    pub heading: String,
    pub body: String,
    pub is_placeholder: bool,
}

impl Analysis {
    pub fn field(&self, kind: PanelKind) -> &str {
        match kind {
            PanelKind::Summary => &self.summary,
            PanelKind::RootCause => &self.root_cause,
            PanelKind::Solution => &self.solution,
        }
    }
}

impl AnalysisPanel {
    /// Builds the panel for `kind` from an optional analysis.
    pub fn build(kind: PanelKind, analysis: Option<&Analysis>) -> Self {
        let (body, is_placeholder) = match analysis {
            Some(analysis) => (analysis.field(kind).to_string(), false),
            None => (kind.placeholder().to_string(), true),
        };
        Self {
            kind,
            heading: kind.heading().to_string(),
            body,
            is_placeholder,
        }
    }
}
