//! Core traits for notekeep abstractions.
//!
//! These traits define the interfaces that concrete implementations
//! must satisfy, enabling pluggable backends and testability.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::*;

// =============================================================================
// NOTE REPOSITORY TRAITS
// =============================================================================

/// Record store for notes.
///
/// Every call takes a [`NoteFilter`], which always carries an owner, so
/// ownership is checked in the same statement that reads or writes.
#[async_trait]
pub trait NoteRepository: Send + Sync {
    /// Persist a new note, assigning its id and timestamps.
    async fn create(&self, note: NewNote) -> Result<Note>;

    /// First note matching the filter, if any.
    async fn find_first(&self, filter: NoteFilter) -> Result<Option<Note>>;

    /// Apply `patch` to the note matching `filter` and return it.
    ///
    /// Returns `None` when nothing matched; nothing is written in that case.
    async fn update(&self, filter: NoteFilter, patch: NotePatch) -> Result<Option<Note>>;

    /// Notes matching the filter in `order`, skipping `skip` and returning at most `take`.
    async fn find_many(
        &self,
        filter: NoteFilter,
        order: NoteOrder,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Note>>;

    /// Number of notes matching the filter.
    async fn count(&self, filter: NoteFilter) -> Result<i64>;
}

// =============================================================================
// AUTHENTICATION TRAITS
// =============================================================================

/// Turns a bearer credential into a user identity.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// `Ok(None)` means the token is unknown or expired.
    async fn resolve(&self, token: &str) -> Result<Option<AuthUser>>;
}
