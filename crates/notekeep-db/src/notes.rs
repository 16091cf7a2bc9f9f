//! Note repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};

use notekeep_core::{
    new_note_id, Error, NewNote, Note, NoteFilter, NoteOrder, NotePatch, NoteRepository, Result,
};

const NOTE_COLUMNS: &str = "id, owner_id, title, content, created_at_utc, updated_at_utc";

/// PostgreSQL implementation of NoteRepository.
#[derive(Clone)]
pub struct PgNoteRepository {
    pool: Pool<Postgres>,
}

impl PgNoteRepository {
    /// Create a new PgNoteRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

// =============================================================================
// QUERY BUILDING HELPERS
// =============================================================================

/// Build the WHERE clause for a filter, numbering parameters from `first_param`.
///
/// Binds, in order: `owner_id`, then `id` when present.
fn build_where_clause(filter: &NoteFilter, first_param: usize) -> (String, usize) {
    let mut clause = format!("WHERE owner_id = ${}", first_param);
    let mut next = first_param + 1;
    if filter.id.is_some() {
        clause.push_str(&format!(" AND id = ${}", next));
        next += 1;
    }
    (clause, next)
}

fn build_order_clause(order: NoteOrder) -> &'static str {
    match order {
        NoteOrder::UpdatedDesc => "ORDER BY updated_at_utc DESC, id DESC",
    }
}

/// Build the SET list for a patch. `$1` is always the new timestamp.
///
/// Binds, in order: `title` when present, then `content` when present.
fn build_set_clause(patch: &NotePatch, first_param: usize) -> (String, usize) {
    // Monotonic per note so a rapid second write still moves updated_at forward.
    let mut sets =
        vec!["updated_at_utc = GREATEST($1, updated_at_utc + INTERVAL '1 microsecond')".to_string()];
    let mut next = first_param;
    if patch.title.is_some() {
        sets.push(format!("title = ${}", next));
        next += 1;
    }
    if patch.content.is_some() {
        sets.push(format!("content = ${}", next));
        next += 1;
    }
    (sets.join(", "), next)
}

/// Bind NoteFilter parameters in the order `build_where_clause` numbers them.
macro_rules! bind_filter_params {
    ($query:expr, $filter:expr) => {{
        let mut q = $query.bind(&$filter.owner_id);
        if let Some(id) = $filter.id {
            q = q.bind(id);
        }
        q
    }};
}

/// Map a database row to a Note.
fn map_row_to_note(row: &PgRow) -> Result<Note> {
    Ok(Note {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        owner_id: row.try_get("owner_id")?,
        created_at: row.try_get("created_at_utc")?,
        updated_at: row.try_get("updated_at_utc")?,
    })
}

#[async_trait]
impl NoteRepository for PgNoteRepository {
    async fn create(&self, note: NewNote) -> Result<Note> {
        let query = format!(
            "INSERT INTO note (id, owner_id, title, content, created_at_utc, updated_at_utc)
             VALUES ($1, $2, $3, $4, $5, $5)
             RETURNING {}",
            NOTE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(new_note_id())
            .bind(&note.owner_id)
            .bind(&note.title)
            .bind(&note.content)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        map_row_to_note(&row)
    }

    async fn find_first(&self, filter: NoteFilter) -> Result<Option<Note>> {
        let (where_clause, _) = build_where_clause(&filter, 1);
        let query = format!(
            "SELECT {} FROM note {} {} LIMIT 1",
            NOTE_COLUMNS,
            where_clause,
            build_order_clause(NoteOrder::UpdatedDesc)
        );

        let row = bind_filter_params!(sqlx::query(&query), filter)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.as_ref().map(map_row_to_note).transpose()
    }

    async fn update(&self, filter: NoteFilter, patch: NotePatch) -> Result<Option<Note>> {
        if filter.id.is_none() {
            return Err(Error::Internal(
                "note update requires an id in the filter".to_string(),
            ));
        }

        let (set_clause, next) = build_set_clause(&patch, 2);
        let (where_clause, _) = build_where_clause(&filter, next);
        let query = format!(
            "UPDATE note SET {} {} RETURNING {}",
            set_clause, where_clause, NOTE_COLUMNS
        );

        let mut q = sqlx::query(&query).bind(Utc::now());
        if let Some(title) = &patch.title {
            q = q.bind(title);
        }
        if let Some(content) = &patch.content {
            q = q.bind(content);
        }
        let row = bind_filter_params!(q, filter)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        row.as_ref().map(map_row_to_note).transpose()
    }

    async fn find_many(
        &self,
        filter: NoteFilter,
        order: NoteOrder,
        skip: i64,
        take: i64,
    ) -> Result<Vec<Note>> {
        let (where_clause, next) = build_where_clause(&filter, 1);
        let query = format!(
            "SELECT {} FROM note {} {} OFFSET ${} LIMIT ${}",
            NOTE_COLUMNS,
            where_clause,
            build_order_clause(order),
            next,
            next + 1
        );

        let rows = bind_filter_params!(sqlx::query(&query), filter)
            .bind(skip)
            .bind(take)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        rows.iter().map(map_row_to_note).collect()
    }

    async fn count(&self, filter: NoteFilter) -> Result<i64> {
        let (where_clause, _) = build_where_clause(&filter, 1);
        let query = format!("SELECT COUNT(*) FROM note {}", where_clause);

        let total: i64 = bind_filter_params!(sqlx::query_scalar(&query), filter)
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(total)
    }
}
