// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! # Bookhive Reading Service
//!
//! Tracks reading progress per user and book. The `user_id` in every
//! request is the one the gateway injected after token verification; this
//! service never sees a token and never trusts a client-supplied id.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::router;
pub use state::AppState;
