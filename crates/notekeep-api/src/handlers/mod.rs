//! Request handlers.

pub mod notes;
pub mod system;
