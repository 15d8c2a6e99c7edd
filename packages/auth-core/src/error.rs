// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Authentication and authorization errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication and authorization error type.
///
/// Every token failure collapses to a 401 for the client; the distinct
/// variants exist so the precise reason is available for server-side logs
/// and tests. Authorization failures on an already-verified identity are
/// the 403 family.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Invalid authorization header format
    InvalidAuthHeader,
    /// Token is not a decodable token at all
    MalformedToken,
    /// Token signature is invalid
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// Token decoded but identity claims are missing or unusable
    MalformedClaims,
    /// Authenticated user does not own the requested resource
    NotResourceOwner,
    /// Authenticated user lacks the required role
    InsufficientRole,
    /// Token signing failed
    SigningFailed(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
    error_code: String,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::MalformedClaims => "malformed_claims",
            AuthError::NotResourceOwner => "not_resource_owner",
            AuthError::InsufficientRole => "insufficient_role",
            AuthError::SigningFailed(_) => "signing_failed",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::MalformedToken
            | AuthError::InvalidSignature
            | AuthError::TokenExpired
            | AuthError::MalformedClaims => StatusCode::UNAUTHORIZED,
            AuthError::NotResourceOwner | AuthError::InsufficientRole => StatusCode::FORBIDDEN,
            AuthError::SigningFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::MalformedToken => write!(f, "Invalid or expired token"),
            AuthError::InvalidSignature => write!(f, "Invalid or expired token"),
            AuthError::TokenExpired => write!(f, "Invalid or expired token"),
            AuthError::MalformedClaims => write!(f, "Invalid or expired token"),
            AuthError::NotResourceOwner => write!(f, "Access denied"),
            AuthError::InsufficientRole => {
                write!(f, "Insufficient permissions for this operation")
            }
            AuthError::SigningFailed(msg) => write!(f, "Token signing failed: {msg}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_auth_returns_401() {
        let response = AuthError::MissingAuthHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error_code"], "missing_auth_header");
    }

    #[tokio::test]
    async fn token_failures_share_the_generic_401_message() {
        // The client must not learn why verification failed.
        for error in [
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::TokenExpired,
            AuthError::MalformedClaims,
        ] {
            assert_eq!(error.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(error.to_string(), "Invalid or expired token");
        }
    }

    #[tokio::test]
    async fn ownership_failure_returns_403() {
        let response = AuthError::NotResourceOwner.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body["error"], "Access denied");
    }

    #[tokio::test]
    async fn insufficient_role_returns_403() {
        let response = AuthError::InsufficientRole.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn signing_failure_is_internal() {
        let error = AuthError::SigningFailed("boom".to_string());
        assert_eq!(error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.error_code(), "signing_failed");
    }
}
