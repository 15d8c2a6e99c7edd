// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Gateway routes.
//!
//! Every protected route follows the same shape: verify the bearer token,
//! apply the route's authorization requirements, then forward to the
//! owning service and relay its reply. Auth failures never reach a
//! downstream service.

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::state::AppState;

pub mod books;
pub mod reading;
pub mod users;

pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/users/register", post(users::register))
        .route("/users/login", post(users::login))
        .route("/users/me", get(users::me))
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/{book_id}",
            get(books::get_book).delete(books::delete_book),
        )
        .route("/books/admin/add", post(books::admin_add_book))
        .route("/books/{book_id}/content", get(books::get_book_content))
        .route("/reading/start", post(reading::start_reading))
        .route("/reading/stop", post(reading::stop_reading))
        .route("/reading/progress/{user_id}", get(reading::get_progress))
        .route(
            "/reading/progress/{user_id}/{book_id}",
            get(reading::get_book_progress),
        )
        .route("/health", get(health))
        .with_state(state);

    Router::new()
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Gateway liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses((status = 200, description = "Gateway is running"))
)]
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        users::register,
        users::login,
        users::me,
        books::list_books,
        books::get_book,
        books::create_book,
        books::delete_book,
        books::admin_add_book,
        books::get_book_content,
        reading::start_reading,
        reading::stop_reading,
        reading::get_progress,
        reading::get_book_progress,
        health,
    ),
    components(
        schemas(
            users::RegisterRequest,
            users::LoginRequest,
            books::BookCreateRequest,
            reading::StartReadingRequest,
        )
    ),
    tags(
        (name = "Users", description = "Registration, login, and current user"),
        (name = "Books", description = "Book catalog (admin-managed)"),
        (name = "Reading", description = "Per-user reading progress"),
        (name = "Health", description = "Liveness")
    )
)]
struct ApiDoc;
