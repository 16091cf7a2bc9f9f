//! JSON response envelopes.

use serde::Serialize;
use utoipa::ToSchema;

use notekeep_core::{Note, PaginationMeta};

/// `{"data": ...}`, returned by create.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// `{"success": true, "data": ...}`, returned by update and get.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// One page of notes plus its pagination metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct NoteListResponse {
    pub success: bool,
    pub data: Vec<Note>,
    pub pagination: PaginationMeta,
}

impl NoteListResponse {
    pub fn new(data: Vec<Note>, pagination: PaginationMeta) -> Self {
        Self {
            success: true,
            data,
            pagination,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
}
