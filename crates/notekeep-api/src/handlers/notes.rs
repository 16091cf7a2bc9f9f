//! Note endpoints, mounted under `/api/notes`.
//!
//! Every handler runs behind [`require_auth`](crate::auth::require_auth) and
//! scopes its store call to the caller with a [`NoteFilter`]. A note owned by
//! someone else is reported exactly like a missing one.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, info};

use notekeep_core::logging::{OP_CREATE_NOTE, OP_GET_NOTE, OP_LIST_NOTES, OP_UPDATE_NOTE};
use notekeep_core::validation::TITLE_REQUIRED;
use notekeep_core::{
    parse_note_id, parse_pagination, validate_new_note, validate_patch, AuthUser, Error, Note,
    NoteFilter, NoteOrder,
};

use crate::error::{ApiError, OperationContext};
use crate::response::{DataResponse, NoteListResponse, SuccessResponse};
use crate::AppState;

pub const NOTE_NOT_FOUND: &str = "Note not found";
pub const CONTENT_NOT_STRING: &str = "Content must be a string";

/// Body for create and update.
///
/// Fields stay loosely typed so a wrong JSON type gets a field-specific
/// message instead of a serde rejection.
#[derive(Debug, Default, Deserialize)]
pub struct NoteBody {
    /// `Some(Value::Null)` for an explicit `null`, `None` only when missing.
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl NoteBody {
    /// `None` when no title was sent; any sent value must be a string.
    fn title(&self) -> Result<Option<&str>, Error> {
        match &self.title {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(Error::InvalidTitle(TITLE_REQUIRED.to_string())),
        }
    }

    fn content(&self) -> Result<Option<String>, Error> {
        match &self.content {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(Error::InvalidInput(CONTENT_NOT_STRING.to_string())),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListNotesQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// `POST /api/notes/create`
pub async fn create_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Note>>), ApiError> {
    let Json(body) = body?;
    let new_note = validate_new_note(&user.id, body.title()?, body.content()?)?;

    let note = state
        .notes
        .create(new_note)
        .await
        .context(OP_CREATE_NOTE, "Failed to create note")?;

    info!(
        subsystem = "api",
        op = OP_CREATE_NOTE,
        note_id = %note.id,
        user_id = %user.id,
        "Note created"
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(note))))
}

/// `PATCH /api/notes/update/:id`
pub async fn update_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    body: Result<Json<NoteBody>, JsonRejection>,
) -> Result<Json<SuccessResponse<Note>>, ApiError> {
    let id = parse_note_id(&id)?;
    let Json(body) = body?;
    let patch = validate_patch(body.title()?, body.content()?)?;

    let note = state
        .notes
        .update(NoteFilter::owned_note(&user.id, id), patch)
        .await
        .context(OP_UPDATE_NOTE, "Failed to update note")?
        .ok_or_else(|| ApiError::NotFound(NOTE_NOT_FOUND.to_string()))?;

    info!(
        subsystem = "api",
        op = OP_UPDATE_NOTE,
        note_id = %note.id,
        user_id = %user.id,
        "Note updated"
    );
    Ok(Json(SuccessResponse::new(note)))
}

/// `GET /api/notes/:id`
pub async fn get_note(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse<Note>>, ApiError> {
    let id = parse_note_id(&id)?;

    let note = state
        .notes
        .find_first(NoteFilter::owned_note(&user.id, id))
        .await
        .context(OP_GET_NOTE, "Failed to fetch note")?
        .ok_or_else(|| {
            debug!(op = OP_GET_NOTE, note_id = %id, user_id = %user.id, "No owned note");
            ApiError::NotFound(NOTE_NOT_FOUND.to_string())
        })?;

    Ok(Json(SuccessResponse::new(note)))
}

/// `GET /api/notes/all?page=&limit=`
///
/// The page and the total are fetched concurrently.
pub async fn list_notes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<ListNotesQuery>, QueryRejection>,
) -> Result<Json<NoteListResponse>, ApiError> {
    let Query(query) = query?;
    let page = parse_pagination(query.page.as_deref(), query.limit.as_deref())?;

    let filter = NoteFilter::owned_by(&user.id);
    let (notes, total) = futures::try_join!(
        state
            .notes
            .find_many(filter.clone(), NoteOrder::UpdatedDesc, page.skip, page.limit),
        state.notes.count(filter),
    )
    .context(OP_LIST_NOTES, "Failed to fetch notes")?;

    debug!(
        op = OP_LIST_NOTES,
        user_id = %user.id,
        page = page.page,
        result_count = notes.len(),
        total,
        "Listed notes"
    );
    Ok(Json(NoteListResponse::new(notes, page.meta(total))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> NoteBody {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_title_missing_vs_present() {
        assert_eq!(body(json!({})).title().unwrap(), None);
        assert_eq!(body(json!({"title": "T"})).title().unwrap(), Some("T"));
    }

    #[test]
    fn test_non_string_title_is_rejected() {
        for value in [json!(42), json!(null), json!(["x"]), json!({"t": 1})] {
            assert!(matches!(
                body(json!({ "title": value })).title(),
                Err(Error::InvalidTitle(msg)) if msg == TITLE_REQUIRED
            ));
        }
    }

    #[test]
    fn test_content_must_be_string_or_null() {
        assert_eq!(body(json!({})).content().unwrap(), None);
        assert_eq!(body(json!({"content": null})).content().unwrap(), None);
        assert_eq!(
            body(json!({"content": "x"})).content().unwrap(),
            Some("x".to_string())
        );
        assert!(matches!(
            body(json!({"content": [1, 2]})).content(),
            Err(Error::InvalidInput(msg)) if msg == CONTENT_NOT_STRING
        ));
    }
}
