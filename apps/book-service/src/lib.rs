// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! # Bookhive Book Service
//!
//! Owns the book catalog. Plain CRUD plus text upload: uploaded books are
//! paginated into fixed-size pages served back page-by-page through the
//! content endpoint. The service does not verify tokens; admin-only routes
//! are enforced at the gateway before a request ever reaches this process.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::router;
pub use state::AppState;
