// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! # Bookhive Gateway
//!
//! The edge of the platform. Every request lands here first; the gateway
//! verifies the bearer token, applies route-level role and ownership
//! checks, and only then forwards to the owning service. Downstream
//! services trust the identity the gateway injects, so this crate is the
//! whole authentication boundary.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod upstream;

pub use config::GatewayConfig;
pub use routes::router;
pub use state::AppState;
