//! Upload domain module.
//!
//! - `model`: the user-supplied file (`UploadedFile`) and its category
//! - `receipt`: what a recorded selection ended up containing

mod model;
mod receipt;

pub use model::{UploadCategory, UploadedFile};
pub use receipt::UploadReceipt;
