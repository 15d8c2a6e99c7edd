// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Book routes: forwarded to the book service.
//!
//! Reads are public; catalog mutations require the admin role, enforced
//! here before anything is forwarded.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use bookhive_auth::AdminOnly;

use crate::{
    error::GatewayError,
    state::AppState,
    upstream::{Service, UpstreamResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookCreateRequest {
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    pub year: i32,
    #[serde(default)]
    pub pages: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

/// List the catalog.
#[utoipa::path(
    get,
    path = "/books",
    tag = "Books",
    responses((status = 200, description = "All books"))
)]
pub async fn list_books(State(state): State<AppState>) -> Result<UpstreamResponse, GatewayError> {
    Ok(state.upstream.get(Service::Books, "/books").await?)
}

/// One book by id.
#[utoipa::path(
    get,
    path = "/books/{book_id}",
    tag = "Books",
    params(("book_id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book"),
        (status = 404, description = "Book not found"),
    )
)]
pub async fn get_book(
    Path(book_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<UpstreamResponse, GatewayError> {
    Ok(state
        .upstream
        .get(Service::Books, &format!("/books/{book_id}"))
        .await?)
}

/// Paginated text content of an uploaded book.
#[utoipa::path(
    get,
    path = "/books/{book_id}/content",
    tag = "Books",
    params(("book_id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Page list"),
        (status = 404, description = "No content for this book"),
    )
)]
pub async fn get_book_content(
    Path(book_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<UpstreamResponse, GatewayError> {
    Ok(state
        .upstream
        .get(Service::Books, &format!("/books/{book_id}/content"))
        .await?)
}

/// Add a book to the catalog. Admin only.
#[utoipa::path(
    post,
    path = "/books",
    tag = "Books",
    security(("bearer" = [])),
    request_body = BookCreateRequest,
    responses(
        (status = 201, description = "Book created"),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 403, description = "Caller is not an admin"),
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AdminOnly(identity): AdminOnly,
    Json(request): Json<BookCreateRequest>,
) -> Result<UpstreamResponse, GatewayError> {
    tracing::info!(admin = %identity.user_id, title = %request.title, "admin creating book");
    let body = json!({
        "title": request.title,
        "author": request.author,
        "description": request.description,
        "year": request.year,
        "pages": request.pages,
        "cover_url": request.cover_url,
    });
    Ok(state.upstream.post_json(Service::Books, "/books", &body).await?)
}

/// Remove a book from the catalog. Admin only.
#[utoipa::path(
    delete,
    path = "/books/{book_id}",
    tag = "Books",
    security(("bearer" = [])),
    params(("book_id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Book not found"),
    )
)]
pub async fn delete_book(
    Path(book_id): Path<i64>,
    State(state): State<AppState>,
    AdminOnly(identity): AdminOnly,
) -> Result<UpstreamResponse, GatewayError> {
    tracing::info!(admin = %identity.user_id, book_id, "admin deleting book");
    Ok(state
        .upstream
        .delete(Service::Books, &format!("/books/{book_id}"))
        .await?)
}

/// Upload a book with its text file. Admin only.
///
/// The multipart form is rebuilt field-by-field and forwarded with the
/// longer upload timeout; the book service does the pagination.
#[utoipa::path(
    post,
    path = "/books/admin/add",
    tag = "Books",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Book uploaded and paginated"),
        (status = 400, description = "Unsupported file format"),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 403, description = "Caller is not an admin"),
    )
)]
pub async fn admin_add_book(
    State(state): State<AppState>,
    AdminOnly(identity): AdminOnly,
    mut multipart: Multipart,
) -> Result<UpstreamResponse, GatewayError> {
    let mut form = reqwest::multipart::Form::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GatewayError::BadRequest(format!("Invalid multipart form: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| GatewayError::BadRequest(format!("Failed to read upload: {e}")))?
                .to_vec();

            let part = reqwest::multipart::Part::bytes(bytes.clone()).file_name(filename.clone());
            let part = match content_type {
                Some(content_type) => part.mime_str(&content_type).unwrap_or_else(|_| {
                    // Unparseable content type: forward the bytes without one.
                    reqwest::multipart::Part::bytes(bytes).file_name(filename)
                }),
                None => part,
            };
            form = form.part("file", part);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| GatewayError::BadRequest(format!("Invalid multipart field: {e}")))?;
            form = form.text(name, value);
        }
    }

    tracing::info!(admin = %identity.user_id, "admin uploading book");
    Ok(state
        .upstream
        .post_multipart(Service::Books, "/books/upload", form)
        .await?)
}
