//! Shared types: attachment sets, the canonical filename list and errors.

mod attachments;
mod error;
mod priority;

pub use attachments::*;
pub use error::*;
pub use priority::*;
