// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Reading routes: forwarded to the reading service.
//!
//! This is the identity-propagation slice: `start` and `stop` inject the
//! verified `user_id` into the outgoing payload, and the progress reads
//! apply the ownership check before anything leaves the gateway. The
//! reading service itself never sees a token.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use utoipa::ToSchema;

use bookhive_auth::{authorize, Auth};

use crate::{
    error::GatewayError,
    state::AppState,
    upstream::{Service, UpstreamResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StartReadingRequest {
    pub book_id: i64,
    /// Page the reader is currently on.
    pub page: i64,
}

/// Start (or resume) reading a book.
#[utoipa::path(
    post,
    path = "/reading/start",
    tag = "Reading",
    security(("bearer" = [])),
    request_body = StartReadingRequest,
    responses(
        (status = 200, description = "Progress recorded"),
        (status = 401, description = "Missing, invalid, or expired token"),
    )
)]
pub async fn start_reading(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Json(request): Json<StartReadingRequest>,
) -> Result<UpstreamResponse, GatewayError> {
    forward_progress(&state, &identity.user_id, "/reading/start", request).await
}

/// Stop reading a book, recording the final page.
#[utoipa::path(
    post,
    path = "/reading/stop",
    tag = "Reading",
    security(("bearer" = [])),
    request_body = StartReadingRequest,
    responses(
        (status = 200, description = "Progress recorded"),
        (status = 401, description = "Missing, invalid, or expired token"),
    )
)]
pub async fn stop_reading(
    State(state): State<AppState>,
    Auth(identity): Auth,
    Json(request): Json<StartReadingRequest>,
) -> Result<UpstreamResponse, GatewayError> {
    forward_progress(&state, &identity.user_id, "/reading/stop", request).await
}

async fn forward_progress(
    state: &AppState,
    user_id: &str,
    path: &str,
    request: StartReadingRequest,
) -> Result<UpstreamResponse, GatewayError> {
    // The verified identity overrides anything the client could send.
    let body = json!({
        "user_id": user_id,
        "book_id": request.book_id,
        "page": request.page,
    });

    Ok(state.upstream.post_json(Service::Reading, path, &body).await?)
}

/// All reading progress for a user. Owner only.
#[utoipa::path(
    get,
    path = "/reading/progress/{user_id}",
    tag = "Reading",
    security(("bearer" = [])),
    params(("user_id" = String, Path, description = "Owning user id")),
    responses(
        (status = 200, description = "Progress rows"),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 403, description = "Caller does not own this progress"),
    )
)]
pub async fn get_progress(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<UpstreamResponse, GatewayError> {
    authorize(&identity, Some(&user_id), None)?;

    Ok(state
        .upstream
        .get(Service::Reading, &format!("/reading/progress/{user_id}"))
        .await?)
}

/// Reading progress for one book. Owner only.
///
/// The reading service exposes per-user progress; the per-book view is a
/// gateway-side filter over that list.
#[utoipa::path(
    get,
    path = "/reading/progress/{user_id}/{book_id}",
    tag = "Reading",
    security(("bearer" = [])),
    params(
        ("user_id" = String, Path, description = "Owning user id"),
        ("book_id" = i64, Path, description = "Book id"),
    ),
    responses(
        (status = 200, description = "Progress rows for the book"),
        (status = 401, description = "Missing, invalid, or expired token"),
        (status = 403, description = "Caller does not own this progress"),
    )
)]
pub async fn get_book_progress(
    Path((user_id, book_id)): Path<(String, i64)>,
    State(state): State<AppState>,
    Auth(identity): Auth,
) -> Result<UpstreamResponse, GatewayError> {
    authorize(&identity, Some(&user_id), None)?;

    let mut response = state
        .upstream
        .get(Service::Reading, &format!("/reading/progress/{user_id}"))
        .await?;

    if let Value::Array(rows) = &mut response.body {
        rows.retain(|row| row.get("book_id").and_then(Value::as_i64) == Some(book_id));
    }

    Ok(response)
}
