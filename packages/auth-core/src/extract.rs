// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Axum extractors for authenticated requests.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(identity): Auth) -> impl IntoResponse {
//!     // identity is a verified Identity
//! }
//! ```
//!
//! The extractors are generic over the application state: any state that
//! can hand out a [`TokenVerifier`] via `FromRef` works, so the gateway and
//! the user service share them without sharing a state type.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::claims::Identity;
use crate::error::AuthError;
use crate::guard::authorize;
use crate::roles::Role;
use crate::token::TokenVerifier;

/// Extractor for authenticated requests.
///
/// Validates the bearer token from the Authorization header and yields the
/// verified identity. Rejections map to 401 via [`AuthError`].
pub struct Auth(pub Identity);

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
    TokenVerifier: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // First check if middleware already verified the identity
        if let Some(identity) = parts.extensions.get::<Identity>().cloned() {
            return Ok(Auth(identity));
        }

        let token = bearer_token(parts)?;
        let identity = TokenVerifier::from_ref(state).verify(token)?;

        Ok(Auth(identity))
    }
}

/// Extract the raw bearer token from the Authorization header.
pub fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)
}

/// Extractor that additionally requires the admin role.
///
/// Rejections are 401 when the token itself fails and 403 when the token is
/// fine but the role is not admin.
pub struct AdminOnly(pub Identity);

impl<S> FromRequestParts<S> for AdminOnly
where
    S: Send + Sync,
    TokenVerifier: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Auth(identity) = Auth::from_request_parts(parts, state).await?;
        authorize(&identity, None, Some(Role::Admin))?;

        Ok(AdminOnly(identity))
    }
}
