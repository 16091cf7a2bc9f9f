//! In-memory note repository.
//!
//! Same contract as [`PgNoteRepository`](crate::PgNoteRepository), held in a
//! map behind an async lock. Used by the API tests and by `NOTES_STORAGE=memory`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use notekeep_core::{
    new_note_id, NewNote, Note, NoteFilter, NoteOrder, NotePatch, NoteRepository, Result,
};

#[derive(Clone, Default)]
pub struct MemoryNoteRepository {
    notes: Arc<RwLock<HashMap<Uuid, Note>>>,
}

impl MemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes across all owners.
    pub async fn len(&self) -> usize {
        self.notes.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.read().await.is_empty()
    }
}

fn sort_notes(notes: &mut [Note], order: NoteOrder) {
    match order {
        NoteOrder::UpdatedDesc => {
            notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(b.id.cmp(&a.id)))
        }
    }
}

#[async_trait]
impl NoteRepository for MemoryNoteRepository {
    async fn create(&self, note: NewNote) -> Result<Note> {
        let now = Utc::now();
        let stored = Note {
            id: new_note_id(),
            title: note.title,
            content: note.content,
            owner_id: note.owner_id,
            created_at: now,
            updated_at: now,
        };
        self.notes.write().await.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_first(&self, filter: NoteFilter) -> Result<Option<Note>> {
        let notes = self.notes.read().await;
        let mut matching: Vec<Note> = notes
            .values()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        sort_notes(&mut matching, NoteOrder::UpdatedDesc);
        Ok(matching.into_iter().next())
    }

    async fn update(&self, filter: NoteFilter, patch: NotePatch) -> Result<Option<Note>> {
        let mut notes = self.notes.write().await;
        let Some(note) = notes.values_mut().find(|n| filter.matches(n)) else {
            return Ok(None);
        };
        let now = Utc::now().max(note.updated_at + Duration::microseconds(1));
        patch.apply_to(note, now);
        Ok(Some(note.clone()))
    }

    async fn find_many(
        &self,
        filter: NoteFilter,
        order: NoteOrder,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Note>> {
        let notes = self.notes.read().await;
        let mut matching: Vec<Note> = notes
            .values()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        sort_notes(&mut matching, order);
        Ok(matching
            .into_iter()
            .skip(skip.max(0) as usize)
            .take(take.max(0) as usize)
            .collect())
    }

    async fn count(&self, filter: NoteFilter) -> Result<i64> {
        let notes = self.notes.read().await;
        Ok(notes.values().filter(|n| filter.matches(n)).count() as i64)
    }
}
