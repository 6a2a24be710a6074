//! Domain layer for the Virtual On-Call Engineer.
//!
//! Holds the triage session state machine, the models it carries, the
//! collaborator traits it calls out to, and the configuration that tunes it.

pub mod analysis;
pub mod config;
pub mod encoding;
pub mod error;
pub mod session;
pub mod ticket;
pub mod upload;

pub use error::{AnalyzeError, FetchError, ServiceError, ServiceErrorKind, UploadError};
