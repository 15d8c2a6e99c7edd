// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! User endpoints: register, login, current user.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use bookhive_auth::{Auth, Identity, Role};

use crate::{
    error::ApiError,
    password::{hash_password, verify_password},
    state::AppState,
    store::PublicUser,
};

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Requested role; defaults to `user`.
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub role: Role,
    pub user_id: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
        .route("/users/me", get(me))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Register a new user.
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicUser>), ApiError> {
    let name = request.name.trim().to_string();
    let email = request.email.trim().to_lowercase();
    if name.is_empty() || email.is_empty() || request.password.is_empty() {
        return Err(ApiError::bad_request(
            "name, email, and password are required",
        ));
    }

    // Hash outside the store lock; Argon2 is deliberately slow.
    let password_hash = hash_password(&request.password)?;

    let mut store = state.store.write().await;
    let user = store.create_user(name, email, password_hash, request.role)?;

    tracing::info!(user_id = %user.id, role = %user.role, "user registered");
    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

/// Verify credentials and issue an access token.
///
/// Both unknown email and wrong password return the same 401; the response
/// must not reveal which one failed.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = request.email.trim().to_lowercase();

    let (password_hash, identity) = {
        let store = state.store.read().await;
        let user = store
            .find_by_email(&email)
            .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

        (
            user.password_hash.clone(),
            Identity {
                email: user.email.clone(),
                role: user.role,
                user_id: user.id.clone(),
            },
        )
    };

    // Verify outside the store lock; Argon2 is deliberately slow.
    if !verify_password(&request.password, &password_hash) {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let access_token = state.issuer.issue(&identity).map_err(|e| {
        tracing::error!(error = %e, "token issuing failed");
        ApiError::internal("Failed to issue access token")
    })?;

    tracing::info!(user_id = %identity.user_id, "login succeeded");
    Ok(Json(LoginResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Return the identity asserted by the caller's own token.
///
/// This service verifies the bearer token itself rather than trusting an
/// injected identity; it shares the signing secret with the gateway.
pub async fn me(Auth(identity): Auth) -> Json<MeResponse> {
    Json(MeResponse {
        email: identity.email,
        role: identity.role,
        user_id: identity.user_id,
    })
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}
