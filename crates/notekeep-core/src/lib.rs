//! # notekeep-core
//!
//! Core types, traits, and validation for notekeep.
//!
//! This crate provides the note data model, the repository and identity
//! traits that storage and auth backends implement, and the pure
//! validation and pagination rules the HTTP layer applies.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod pagination;
pub mod traits;
pub mod uuid_utils;
pub mod validation;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use pagination::{parse_pagination, PageRequest, PaginationMeta};
pub use traits::*;
pub use uuid_utils::{is_v4_shape, new_note_id, parse_note_id};
pub use validation::{validate_new_note, validate_patch, validate_title};
