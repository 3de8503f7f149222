use crate::{
    dto::{CreateNoteRequest, NoteResponse, StatusResponse, UpdateNoteRequest},
    models::Note,
    repository::{Repository, StoreError},
};

use std::sync::Arc;

use tokio::task;

/// Bridges the async handlers and the blocking SQLite repository. Each call
/// runs on the blocking pool so request handling never stalls the runtime.
#[derive(Clone)]
pub struct NoteService {
    repo: Arc<Repository>,
}

impl NoteService {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }

    pub async fn notes_for_date(
        &self,
        date_key: String,
    ) -> Result<Vec<NoteResponse>, StoreError> {
        let repo = self.repo.clone();
        let notes = task::spawn_blocking(move || repo.notes_for_date(&date_key)).await??;

        Ok(notes.into_iter().map(note_response).collect())
    }

    pub async fn dates_with_notes(&self) -> Result<Vec<String>, StoreError> {
        let repo = self.repo.clone();

        task::spawn_blocking(move || repo.dates_with_notes()).await?
    }

    pub async fn create_note(
        &self,
        request: CreateNoteRequest,
    ) -> Result<StatusResponse, StoreError> {
        let repo = self.repo.clone();
        let note = Note {
            id: request.id,
            date_key: request.date_key,
            title: request.title,
            content: request.content,
            created_at: request.created_at,
            updated_at: request.updated_at,
        };
        let id = note.id.clone();

        task::spawn_blocking(move || repo.create_note(&note)).await??;

        Ok(StatusResponse {
            status: "created".to_string(),
            id,
        })
    }

    pub async fn update_note(
        &self,
        id: String,
        request: UpdateNoteRequest,
    ) -> Result<Option<StatusResponse>, StoreError> {
        let repo = self.repo.clone();
        let note_id = id.clone();
        let updated = task::spawn_blocking(move || {
            repo.update_note(
                &note_id,
                request.title.as_deref(),
                request.content.as_deref(),
                &request.updated_at,
            )
        })
        .await??;

        Ok(updated.then(|| StatusResponse {
            status: "updated".to_string(),
            id,
        }))
    }

    pub async fn delete_note(&self, id: String) -> Result<Option<StatusResponse>, StoreError> {
        let repo = self.repo.clone();
        let note_id = id.clone();
        let deleted = task::spawn_blocking(move || repo.delete_note(&note_id)).await??;

        Ok(deleted.then(|| StatusResponse {
            status: "deleted".to_string(),
            id,
        }))
    }
}

fn note_response(note: Note) -> NoteResponse {
    NoteResponse {
        id: note.id,
        date_key: note.date_key,
        title: note.title,
        content: note.content,
        created_at: note.created_at,
        updated_at: note.updated_at,
    }
}
