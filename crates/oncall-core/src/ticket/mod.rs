//! Ticket domain module.
//!
//! - `model`: read-only ticket snapshot (`Ticket`, `TicketFile`)
//! - `service`: the Ticket Service collaborator trait

mod model;
mod service;

pub use model::{FileDownload, Ticket, TicketFile, TicketFileKind};
pub use service::TicketService;
