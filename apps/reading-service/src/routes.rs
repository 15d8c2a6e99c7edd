// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Reading progress endpoints.
//!
//! `start` and `stop` share upsert semantics: both record the page the
//! reader is on. The split exists so clients can bracket a session without
//! the service needing session state.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::ApiError,
    state::AppState,
    store::ReadingProgress,
};

/// Progress update as forwarded by the gateway; `user_id` is the verified
/// identity the gateway injected, never a client-supplied value.
#[derive(Debug, Deserialize)]
pub struct ProgressUpdate {
    pub user_id: String,
    pub book_id: i64,
    pub page: i64,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/reading/start", post(start_reading))
        .route("/reading/stop", post(stop_reading))
        .route("/reading/progress/{user_id}", get(get_progress))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_reading(
    State(state): State<AppState>,
    Json(update): Json<ProgressUpdate>,
) -> Result<Json<ReadingProgress>, ApiError> {
    upsert(state, update).await
}

pub async fn stop_reading(
    State(state): State<AppState>,
    Json(update): Json<ProgressUpdate>,
) -> Result<Json<ReadingProgress>, ApiError> {
    upsert(state, update).await
}

async fn upsert(state: AppState, update: ProgressUpdate) -> Result<Json<ReadingProgress>, ApiError> {
    if update.user_id.trim().is_empty() {
        return Err(ApiError::bad_request("user_id is required"));
    }
    if update.page < 0 {
        return Err(ApiError::bad_request("page must not be negative"));
    }

    let mut store = state.store.write().await;
    let row = store.upsert(update.user_id, update.book_id, update.page);
    tracing::debug!(user_id = %row.user_id, book_id = row.book_id, page = row.current_page, "progress upserted");
    Ok(Json(row))
}

pub async fn get_progress(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
) -> Json<Vec<ReadingProgress>> {
    let store = state.store.read().await;
    Json(store.for_user(&user_id))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
