use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use axum_macros::debug_handler;
use utoipa::OpenApi;

use std::sync::Arc;

use crate::{
    dto::{CreateNoteRequest, NoteResponse, StatusResponse, UpdateNoteRequest},
    repository::StoreError,
    service::NoteService,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        get_notes_by_date,
        get_dates,
        create_note,
        update_note,
        delete_note
    ),
    components(schemas(
        NoteResponse,
        CreateNoteRequest,
        UpdateNoteRequest,
        StatusResponse
    )),
    tags(
        (name = "notes", description = "Calendar notes API")
    )
)]
pub struct ApiDoc;

pub fn api_router(service: Arc<NoteService>) -> Router {
    Router::new()
        .route("/api/notes", post(create_note))
        .route("/api/notes/{key}", get(get_notes_by_date))
        .route("/api/notes/{key}", put(update_note))
        .route("/api/notes/{key}", delete(delete_note))
        .route("/api/dates", get(get_dates))
        .with_state(service)
}

#[utoipa::path(
    get,
    path = "/api/notes/{date_key}",
    params(
        ("date_key" = String, Path, description = "Date the notes belong to")
    ),
    responses(
        (status = 200, description = "All notes for the date, most recent first", body = Vec<NoteResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_notes_by_date(
    State(service): State<Arc<NoteService>>,
    Path(date_key): Path<String>,
) -> Response {
    match service.notes_for_date(date_key).await {
        Ok(notes) => (StatusCode::OK, Json(notes)).into_response(),
        Err(e) => {
            tracing::error!("failed to list note entries: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list notes").into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/dates",
    responses(
        (status = 200, description = "Distinct dates that have notes, newest first", body = Vec<String>),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn get_dates(State(service): State<Arc<NoteService>>) -> Response {
    match service.dates_with_notes().await {
        Ok(dates) => (StatusCode::OK, Json(dates)).into_response(),
        Err(e) => {
            tracing::error!("failed to list note dates: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to list dates").into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/notes",
    request_body = CreateNoteRequest,
    responses(
        (status = 200, description = "Note created successfully", body = StatusResponse),
        (status = 409, description = "Note with this ID already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn create_note(
    State(service): State<Arc<NoteService>>,
    Json(payload): Json<CreateNoteRequest>,
) -> Response {
    match service.create_note(payload).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(StoreError::DuplicateId(_)) => {
            (StatusCode::CONFLICT, "Note with this ID already exists").into_response()
        }
        Err(e) => {
            tracing::error!("failed to create note entry: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create note").into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/notes/{note_id}",
    params(
        ("note_id" = String, Path, description = "Note ID")
    ),
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note updated successfully", body = StatusResponse),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn update_note(
    State(service): State<Arc<NoteService>>,
    Path(note_id): Path<String>,
    Json(payload): Json<UpdateNoteRequest>,
) -> Response {
    match service.update_note(note_id, payload).await {
        Ok(Some(status)) => (StatusCode::OK, Json(status)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Note not found").into_response(),
        Err(e) => {
            tracing::error!("failed to update note entry: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to update note").into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/notes/{note_id}",
    params(
        ("note_id" = String, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note deleted successfully", body = StatusResponse),
        (status = 404, description = "Note not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "notes"
)]
#[debug_handler]
pub async fn delete_note(
    State(service): State<Arc<NoteService>>,
    Path(note_id): Path<String>,
) -> Response {
    match service.delete_note(note_id).await {
        Ok(Some(status)) => (StatusCode::OK, Json(status)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Note not found").into_response(),
        Err(e) => {
            tracing::error!("failed to delete note entry: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to delete note").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    use crate::repository::Repository;

    fn test_app() -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::new(&dir.path().join("notes.db")).unwrap();
        repo.init_schema().unwrap();
        let service = Arc::new(NoteService::new(Arc::new(repo)));
        (api_router(service), dir)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }

    #[tokio::test]
    async fn create_then_list_round_trips_the_note() {
        let (app, _dir) = test_app();
        let note = json!({
            "id": "n1",
            "date_key": "2024-01-05",
            "title": "A",
            "content": "hello",
            "created_at": "t0",
            "updated_at": "t0"
        });

        let (status, body) = send(&app, "POST", "/api/notes", Some(note.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "created", "id": "n1"}));

        let (status, body) = send(&app, "GET", "/api/notes/2024-01-05", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([note]));
    }

    #[tokio::test]
    async fn listing_an_empty_date_returns_empty_array() {
        let (app, _dir) = test_app();

        let (status, body) = send(&app, "GET", "/api/notes/2024-01-05", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn create_with_duplicate_id_conflicts() {
        let (app, _dir) = test_app();
        let note = json!({
            "id": "n1",
            "date_key": "2024-01-05",
            "title": "A",
            "content": "hello",
            "created_at": "t0",
            "updated_at": "t0"
        });

        let (status, _) = send(&app, "POST", "/api/notes", Some(note.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "POST", "/api/notes", Some(note)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (_, body) = send(&app, "GET", "/api/notes/2024-01-05", None).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_defaults_omitted_title_and_content_to_empty() {
        let (app, _dir) = test_app();
        let note = json!({
            "id": "n1",
            "date_key": "2024-01-05",
            "created_at": "t0",
            "updated_at": "t0"
        });

        let (status, _) = send(&app, "POST", "/api/notes", Some(note)).await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, "GET", "/api/notes/2024-01-05", None).await;
        assert_eq!(body[0]["title"], "");
        assert_eq!(body[0]["content"], "");
    }

    #[tokio::test]
    async fn create_without_id_is_rejected_before_storage() {
        let (app, _dir) = test_app();
        let note = json!({
            "date_key": "2024-01-05",
            "created_at": "t0",
            "updated_at": "t0"
        });

        let (status, _) = send(&app, "POST", "/api/notes", Some(note)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (_, body) = send(&app, "GET", "/api/dates", None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn partial_update_touches_only_supplied_fields() {
        let (app, _dir) = test_app();
        let note = json!({
            "id": "n1",
            "date_key": "2024-01-05",
            "title": "A",
            "content": "hello",
            "created_at": "t0",
            "updated_at": "t0"
        });
        send(&app, "POST", "/api/notes", Some(note)).await;

        let update = json!({"content": "world", "updated_at": "t1"});
        let (status, body) = send(&app, "PUT", "/api/notes/n1", Some(update)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "updated", "id": "n1"}));

        let (_, body) = send(&app, "GET", "/api/notes/2024-01-05", None).await;
        assert_eq!(body[0]["title"], "A");
        assert_eq!(body[0]["content"], "world");
        assert_eq!(body[0]["created_at"], "t0");
        assert_eq!(body[0]["updated_at"], "t1");
    }

    #[tokio::test]
    async fn update_of_missing_note_is_not_found() {
        let (app, _dir) = test_app();

        let update = json!({"title": "x", "updated_at": "t1"});
        let (status, _) = send(&app, "PUT", "/api/notes/ghost", Some(update)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_removes_note_and_second_delete_is_not_found() {
        let (app, _dir) = test_app();
        let note = json!({
            "id": "n1",
            "date_key": "2024-01-05",
            "title": "A",
            "content": "hello",
            "created_at": "t0",
            "updated_at": "t0"
        });
        send(&app, "POST", "/api/notes", Some(note)).await;

        let (status, body) = send(&app, "DELETE", "/api/notes/n1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "deleted", "id": "n1"}));

        let (_, body) = send(&app, "GET", "/api/notes/2024-01-05", None).await;
        assert_eq!(body, json!([]));

        let (status, _) = send(&app, "DELETE", "/api/notes/n1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dates_are_deduplicated_and_sorted_descending() {
        let (app, _dir) = test_app();
        for (id, date) in [
            ("a", "2024-01-05"),
            ("b", "2024-01-05"),
            ("c", "2024-03-10"),
            ("d", "2023-11-01"),
        ] {
            let note = json!({
                "id": id,
                "date_key": date,
                "title": "",
                "content": "",
                "created_at": "t0",
                "updated_at": "t0"
            });
            let (status, _) = send(&app, "POST", "/api/notes", Some(note)).await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&app, "GET", "/api/dates", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!(["2024-03-10", "2024-01-05", "2023-11-01"]));
    }
}
