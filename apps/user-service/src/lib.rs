// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! # Bookhive User Service
//!
//! Owns the credential store. Registers users, verifies passwords at login,
//! and issues the access tokens the rest of the platform runs on. Issuing
//! lives here and verification lives at the gateway, but both sides are the
//! same trust domain: they share `bookhive-auth` and the same secret.

pub mod config;
pub mod error;
pub mod password;
pub mod routes;
pub mod state;
pub mod store;

pub use routes::router;
pub use state::AppState;
