// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use bookhive_auth::AuthError;

use crate::upstream::UpstreamError;

/// Everything a gateway handler can fail with.
///
/// Auth failures keep their own response shape from `bookhive-auth`.
/// Transport failures toward a downstream service are logged with detail
/// and surfaced to the client as a generic 502/504 body.
#[derive(Debug)]
pub enum GatewayError {
    Auth(AuthError),
    Upstream(UpstreamError),
    /// The request itself was unusable (e.g. a broken multipart form).
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl From<AuthError> for GatewayError {
    fn from(error: AuthError) -> Self {
        GatewayError::Auth(error)
    }
}

impl From<UpstreamError> for GatewayError {
    fn from(error: UpstreamError) -> Self {
        GatewayError::Upstream(error)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::Auth(error) => error.into_response(),
            GatewayError::Upstream(error) => {
                tracing::warn!(error = %error, "downstream call failed");
                let status = error.status_code();
                let message = match status {
                    StatusCode::GATEWAY_TIMEOUT => "Upstream service timed out",
                    _ => "Upstream service unavailable",
                };
                (
                    status,
                    Json(ErrorBody {
                        error: message.to_string(),
                    }),
                )
                    .into_response()
            }
            GatewayError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { error: message }),
            )
                .into_response(),
        }
    }
}
