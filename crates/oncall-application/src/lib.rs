//! Application layer for the Virtual On-Call Engineer.
//!
//! Coordinates the session domain model with the Ticket and Analysis
//! collaborators, and keeps one controller per user session.

pub mod controller;
pub mod session_manager;

pub use controller::TriageController;
pub use session_manager::TriageSessionManager;
