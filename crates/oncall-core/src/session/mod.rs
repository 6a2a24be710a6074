//! Session domain module.
//!
//! # Module Structure
//!
//! - `stage`: wizard stage (`Stage`)
//! - `model`: the mutable per-user state (`Session`) and its transitions
//! - `view`: the immutable projection handed to the rendering layer (`ViewModel`)

mod model;
mod stage;
mod view;

pub use model::{AnalysisInput, Session, TicketChange};
pub use stage::Stage;
pub use view::{UploadSlot, UploadState, ViewModel};
