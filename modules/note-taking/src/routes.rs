//! Axum route handlers for the note-taking HTTP API.

use crate::error::ApiError;
use crate::store::NoteStore;
use axum::Router;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post};
use note_taking_types::{DeleteNoteResponse, HealthStatus, Note};
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;

pub struct AppState {
    pub store: NoteStore,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/notes/create", post(create_note).fallback(method_not_allowed))
        .route("/notes", get(list_notes).fallback(method_not_allowed))
        .route("/notes/delete/:id", delete(delete_note).fallback(method_not_allowed))
        .route("/health", get(health).fallback(method_not_allowed))
        .fallback(endpoint_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(log_request))
}

// POST /notes/create
pub async fn create_note(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let Json(body) = payload.map_err(|rejection| match rejection {
        JsonRejection::MissingJsonContentType(_) => ApiError::UnsupportedContentType,
        _ => ApiError::InvalidJson,
    })?;

    let text = note_text(&body)?;
    let note = tokio::task::spawn_blocking(move || state.store.create(text))
        .await
        .map_err(|e| {
            log::error!("Create task failed: {}", e);
            ApiError::Internal
        })?
        .map_err(|e| {
            log::error!("Refusing to create note: {}", e);
            ApiError::Internal
        })?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// Pull a usable `text` out of a create body.
fn note_text(body: &Value) -> Result<String, ApiError> {
    match body.get("text") {
        None => Err(ApiError::MissingText),
        Some(Value::Null) => Err(ApiError::EmptyText),
        Some(Value::String(text)) if text.trim().is_empty() => Err(ApiError::EmptyText),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ApiError::TextNotString),
    }
}

// GET /notes
pub async fn list_notes(State(state): State<Arc<AppState>>) -> Json<Vec<Note>> {
    Json(state.store.list())
}

// DELETE /notes/delete/{id}
pub async fn delete_note(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> Result<Json<DeleteNoteResponse>, ApiError> {
    // Non-integer ids never match the route
    let Path(id) = id.map_err(|_| ApiError::EndpointNotFound)?;

    let deleted = tokio::task::spawn_blocking(move || state.store.delete(id))
        .await
        .map_err(|e| {
            log::error!("Delete task failed: {}", e);
            ApiError::Internal
        })?
        .ok_or(ApiError::NoteNotFound(id))?;
    Ok(Json(DeleteNoteResponse::new(deleted)))
}

// GET /health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::healthy())
}

async fn endpoint_not_found() -> ApiError {
    ApiError::EndpointNotFound
}

async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    log::error!("Handler panicked: {}", detail);
    ApiError::Internal.into_response()
}

async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    log::info!("{} {} -> {}", method, uri, response.status().as_u16());
    response
}
