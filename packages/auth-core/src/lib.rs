// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! # Bookhive Authentication Core
//!
//! Shared authentication and authorization for the Bookhive services.
//! The gateway and the user service link this crate so that token issuing
//! and verification stay in one trust domain even though they run in
//! separate processes.
//!
//! ## Auth Flow
//!
//! 1. User service verifies credentials at login and issues an access token
//! 2. Client sends `Authorization: Bearer <token>` on protected routes
//! 3. Gateway:
//!    - Verifies token signature and expiry (HS256, shared secret)
//!    - Extracts the identity claims:
//!      - `sub` → email
//!      - `role` → role
//!      - `id` → canonical `user_id`
//!    - Applies route-level role and ownership checks
//!    - Forwards the request with the verified `user_id` attached
//!
//! ## Security
//!
//! - Tokens always embed an expiry; the verifier requires it
//! - A token with any identity claim missing or empty is rejected outright
//! - Clock skew tolerance is 60 seconds
//! - The shared secret is loaded once at startup and never mutated

pub mod claims;
pub mod error;
pub mod extract;
pub mod guard;
pub mod roles;
pub mod token;

pub use claims::{Identity, TokenClaims};
pub use error::AuthError;
pub use extract::{AdminOnly, Auth};
pub use guard::{authorize, is_owner};
pub use roles::Role;
pub use token::{AuthConfig, TokenIssuer, TokenVerifier, DEFAULT_TOKEN_LIFETIME, DEV_TOKEN_SECRET};
