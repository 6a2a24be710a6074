//! Analysis domain module.
//!
//! - `model`: the three-part analysis result and its display panels
//! - `service`: the Analysis Service collaborator trait

mod model;
mod service;

pub use model::{Analysis, AnalysisPanel, PanelKind};
pub use service::AnalysisService;
