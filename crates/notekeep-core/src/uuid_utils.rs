//! UUID v4 utilities for note identifiers.
//!
//! Note ids are random (version 4) UUIDs. On input the hyphens are
//! optional, but when present they must sit at the canonical positions:
//!
//! ```text
//! xxxxxxxx-xxxx-4xxx-Vxxx-xxxxxxxxxxxx     V in {8, 9, a, b}
//! ```
//!
//! Output always uses the canonical lowercase hyphenated form.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::error::{Error, Result};

static V4_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^[0-9a-f]{8}-?[0-9a-f]{4}-?4[0-9a-f]{3}-?[89ab][0-9a-f]{3}-?[0-9a-f]{12}$",
    )
    .expect("static regex is valid")
});

/// Message returned for identifiers that fail the shape check.
pub const INVALID_NOTE_ID: &str = "Invalid note ID";

/// Generate a new note identifier.
#[inline]
pub fn new_note_id() -> Uuid {
    Uuid::new_v4()
}

/// Check whether `candidate` has the UUID v4 textual shape.
pub fn is_v4_shape(candidate: &str) -> bool {
    V4_SHAPE.is_match(candidate)
}

/// Validate and parse a note identifier from a path segment.
///
/// # Example
///
/// ```
/// use notekeep_core::uuid_utils::parse_note_id;
///
/// let id = parse_note_id("9F1C2B3A4D5E4F60A1B2C3D4E5F60718").unwrap();
/// assert_eq!(id.to_string(), "9f1c2b3a-4d5e-4f60-a1b2-c3d4e5f60718");
/// ```
pub fn parse_note_id(candidate: &str) -> Result<Uuid> {
    if !is_v4_shape(candidate) {
        return Err(Error::InvalidIdentifier(INVALID_NOTE_ID.to_string()));
    }
    let simple: String = candidate.chars().filter(|c| *c != '-').collect();
    Uuid::try_parse(&simple).map_err(|_| Error::InvalidIdentifier(INVALID_NOTE_ID.to_string()))
}
