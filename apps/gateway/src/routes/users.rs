// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! User routes: forwarded to the user service.
//!
//! Register and login are the two unauthenticated routes on the gateway;
//! `/users/me` is verified at the edge and the bearer header is relayed so
//! the user service can decode the same token.

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use bookhive_auth::{Auth, AuthError};

use crate::{
    error::GatewayError,
    state::AppState,
    upstream::{Service, UpstreamResponse},
};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Requested role (`user` or `admin`); defaults to `user`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 409, description = "Email already registered"),
    )
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<UpstreamResponse, GatewayError> {
    let mut body = json!({
        "name": request.name,
        "email": request.email,
        "password": request.password,
    });
    if let Some(role) = request.role {
        body["role"] = json!(role);
    }

    Ok(state
        .upstream
        .post_json(Service::Users, "/users/register", &body)
        .await?)
}

/// Log in and receive an access token.
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Access token issued"),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<UpstreamResponse, GatewayError> {
    let body = json!({
        "email": request.email,
        "password": request.password,
    });
    Ok(state
        .upstream
        .post_json(Service::Users, "/users/login", &body)
        .await?)
}

/// Current user, as asserted by the bearer token.
///
/// Verified at the edge like every protected route, then the header is
/// relayed so the user service answers from the same claim set.
#[utoipa::path(
    get,
    path = "/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Current user identity"),
        (status = 401, description = "Missing, invalid, or expired token"),
    )
)]
pub async fn me(
    State(state): State<AppState>,
    Auth(_identity): Auth,
    headers: HeaderMap,
) -> Result<UpstreamResponse, GatewayError> {
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingAuthHeader)?;

    Ok(state
        .upstream
        .get_authorized(Service::Users, "/users/me", authorization)
        .await?)
}
