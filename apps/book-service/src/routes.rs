// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Book catalog endpoints.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::ApiError,
    state::AppState,
    store::{paginate, Book, BookCreate},
};

#[derive(Debug, Serialize)]
pub struct ContentResponse {
    pub pages: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{book_id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/upload", post(upload_book))
        .route("/books/{book_id}/content", get(get_book_content))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn list_books(State(state): State<AppState>) -> Json<Vec<Book>> {
    let store = state.store.read().await;
    Json(store.list())
}

pub async fn get_book(
    Path(book_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Book>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.get(book_id)?))
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(request): Json<BookCreate>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let mut store = state.store.write().await;
    let book = store.create(request);
    tracing::info!(book_id = book.id, title = %book.title, "book created");
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn update_book(
    Path(book_id): Path<i64>,
    State(state): State<AppState>,
    Json(request): Json<BookCreate>,
) -> Result<Json<Book>, ApiError> {
    let mut store = state.store.write().await;
    Ok(Json(store.update(book_id, request)?))
}

pub async fn delete_book(
    Path(book_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let mut store = state.store.write().await;
    store.delete(book_id)?;
    Ok(Json(DeleteResponse {
        message: "Book deleted".to_string(),
    }))
}

/// Upload a book as a multipart form: catalog fields plus a text file.
///
/// The file is split into fixed-size pages and the page count becomes the
/// book's `pages` field. Only plain text is handled in-process; richer
/// formats need an extraction step this service does not own, so they are
/// rejected outright.
pub async fn upload_book(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    let mut title = None;
    let mut author = None;
    let mut description = String::new();
    let mut year = None;
    let mut cover_url = None;
    let mut file: Option<(String, String)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart form: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "title" => title = Some(read_text_field(field).await?),
            "author" => author = Some(read_text_field(field).await?),
            "description" => description = read_text_field(field).await?,
            "year" => {
                let raw = read_text_field(field).await?;
                year = Some(raw.trim().parse::<i32>().map_err(|_| {
                    ApiError::bad_request("year must be an integer")
                })?);
            }
            "cover_url" => {
                let raw = read_text_field(field).await?;
                if !raw.trim().is_empty() {
                    cover_url = Some(raw);
                }
            }
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read uploaded file: {e}"))
                })?;
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|_| ApiError::bad_request("Uploaded file is not valid UTF-8"))?;
                file = Some((filename, text));
            }
            // The upload form carries a genre field the catalog has no
            // column for; accept and drop it.
            _ => {}
        }
    }

    let title = title.ok_or_else(|| ApiError::bad_request("title is required"))?;
    let author = author.ok_or_else(|| ApiError::bad_request("author is required"))?;
    let year = year.ok_or_else(|| ApiError::bad_request("year is required"))?;
    let (filename, text) = file.ok_or_else(|| ApiError::bad_request("file is required"))?;

    if !filename.to_lowercase().ends_with(".txt") {
        return Err(ApiError::bad_request(
            "Only plain-text (.txt) uploads are supported",
        ));
    }

    let pages = paginate(&text);

    let mut store = state.store.write().await;
    let book = store.create(BookCreate {
        title,
        author,
        description,
        year,
        pages: pages.len() as i64,
        cover_url,
    });
    store.set_content(book.id, pages);

    tracing::info!(book_id = book.id, pages = book.pages, "book uploaded");
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn get_book_content(
    Path(book_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ContentResponse>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(ContentResponse {
        pages: store.content(book_id)?,
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

async fn read_text_field(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart field: {e}")))
}
