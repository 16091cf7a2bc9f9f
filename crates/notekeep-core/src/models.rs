//! Data models for notekeep.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// NOTE TYPES
// =============================================================================

/// A note owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Identity of the creating user; never changes.
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// True when `caller` owns this note.
    pub fn belongs_to(&self, caller: &str) -> bool {
        self.owner_id == caller
    }
}

/// A validated note ready to be stored.
///
/// The store assigns `id` and both timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub owner_id: String,
    pub title: String,
    pub content: String,
}

/// Fields to change on an existing note.
///
/// `None` means "leave as is"; an empty patch still refreshes `updated_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Merge the present fields into `note` and stamp it with `now`.
    pub fn apply_to(&self, note: &mut Note, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            note.title = title.clone();
        }
        if let Some(content) = &self.content {
            note.content = content.clone();
        }
        note.updated_at = now;
    }
}

/// Ownership-scoped selector.
///
/// `owner_id` is mandatory so no store call can reach across owners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFilter {
    pub owner_id: String,
    pub id: Option<Uuid>,
}

impl NoteFilter {
    /// All notes owned by `owner_id`.
    pub fn owned_by(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            id: None,
        }
    }

    /// The single note `id`, only if owned by `owner_id`.
    pub fn owned_note(owner_id: impl Into<String>, id: Uuid) -> Self {
        Self {
            owner_id: owner_id.into(),
            id: Some(id),
        }
    }

    pub fn matches(&self, note: &Note) -> bool {
        note.belongs_to(&self.owner_id) && self.id.map_or(true, |id| note.id == id)
    }
}

/// Sort order for note listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NoteOrder {
    /// Most recently updated first; ties broken by id.
    #[default]
    UpdatedDesc,
}

// =============================================================================
// AUTH TYPES
// =============================================================================

/// The identity an authenticated request acts as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
}

impl AuthUser {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_note(owner: &str) -> Note {
        let now = Utc::now();
        Note {
            id: Uuid::new_v4(),
            title: "Groceries".to_string(),
            content: "milk".to_string(),
            owner_id: owner.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_note_serializes_camel_case() {
        let note = sample_note("user-1");
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["ownerId"], "user-1");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        assert!(json.get("owner_id").is_none());
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut note = sample_note("user-1");
        let later = note.updated_at + Duration::seconds(5);
        let patch = NotePatch {
            title: None,
            content: Some("eggs".to_string()),
        };

        patch.apply_to(&mut note, later);

        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "eggs");
        assert_eq!(note.updated_at, later);
        assert!(note.created_at < note.updated_at);
    }

    #[test]
    fn test_empty_patch_still_touches_updated_at() {
        let mut note = sample_note("user-1");
        let later = note.updated_at + Duration::seconds(1);
        let patch = NotePatch::default();
        assert!(patch.is_empty());

        patch.apply_to(&mut note, later);
        assert_eq!(note.updated_at, later);
    }

    #[test]
    fn test_filter_scopes_by_owner() {
        let note = sample_note("alice");
        assert!(NoteFilter::owned_by("alice").matches(&note));
        assert!(!NoteFilter::owned_by("bob").matches(&note));
        assert!(NoteFilter::owned_note("alice", note.id).matches(&note));
        assert!(!NoteFilter::owned_note("bob", note.id).matches(&note));
        assert!(!NoteFilter::owned_note("alice", Uuid::new_v4()).matches(&note));
    }
}
