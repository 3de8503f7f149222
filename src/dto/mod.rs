use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: String,
    /// Date the note belongs to, e.g. "2024-01-05"
    pub date_key: String,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last modification timestamp
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note ID, generated by the client
    pub id: String,
    /// Date the note belongs to
    pub date_key: String,
    /// Note title, empty when omitted
    #[serde(default)]
    pub title: String,
    /// Note content, empty when omitted
    #[serde(default)]
    pub content: String,
    /// Creation timestamp
    pub created_at: String,
    /// Last modification timestamp
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// New title; left untouched when omitted
    pub title: Option<String>,
    /// New content; left untouched when omitted
    pub content: Option<String>,
    /// Last modification timestamp
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Outcome of the mutation: "created", "updated" or "deleted"
    pub status: String,
    /// ID of the affected note
    pub id: String,
}
