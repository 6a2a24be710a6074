//! Infrastructure layer for the Virtual On-Call Engineer.
//!
//! Concrete collaborators and process-level plumbing: placeholder ticket and
//! analysis services, upload intake, configuration loading and tracing setup.

pub mod config_service;
pub mod logging;
pub mod paths;
pub mod placeholder_analysis_service;
pub mod placeholder_ticket_service;
pub mod upload_intake;

pub use config_service::ConfigService;
pub use paths::OncallPaths;
pub use placeholder_analysis_service::PlaceholderAnalysisService;
pub use placeholder_ticket_service::PlaceholderTicketService;
pub use upload_intake::UploadIntake;
