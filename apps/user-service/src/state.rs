// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

use std::sync::Arc;

use axum::extract::FromRef;
use tokio::sync::RwLock;

use bookhive_auth::{AuthConfig, TokenIssuer, TokenVerifier};

use crate::store::CredentialStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<CredentialStore>>,
    pub issuer: TokenIssuer,
    pub verifier: TokenVerifier,
}

impl AppState {
    pub fn new(auth: &AuthConfig) -> Self {
        Self {
            store: Arc::new(RwLock::new(CredentialStore::new())),
            issuer: TokenIssuer::new(auth),
            verifier: TokenVerifier::new(auth),
        }
    }
}

// Lets the bookhive-auth extractors pull the verifier out of this state.
impl FromRef<AppState> for TokenVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}
