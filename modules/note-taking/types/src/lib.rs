//! Shared types for the note-taking module service and its HTTP clients.

use serde::{Deserialize, Serialize};

// =====================================================
// Request Types
// =====================================================

/// Body of `POST /notes/create`
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateNoteRequest {
    pub text: String,
}

// =====================================================
// Response Types
// =====================================================

/// Body of a successful `DELETE /notes/delete/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteNoteResponse {
    pub message: String,
    pub deleted_note: Note,
}

impl DeleteNoteResponse {
    pub fn new(deleted_note: Note) -> Self {
        Self {
            message: "Note deleted successfully".to_string(),
            deleted_note,
        }
    }
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: "note-taking".to_string(),
        }
    }
}

/// Every failed request carries this body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// =====================================================
// Domain Types
// =====================================================

/// A single stored note
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    pub text: String,
}

/// On-disk record of the whole collection.
///
/// Fields absent from the file take their defaults, so a file holding only
/// `{"notes": [...]}` still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotesSnapshot {
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default = "first_id")]
    pub next_id: u64,
}

pub const FIRST_ID: u64 = 1;

fn first_id() -> u64 {
    FIRST_ID
}

impl Default for NotesSnapshot {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            next_id: FIRST_ID,
        }
    }
}
