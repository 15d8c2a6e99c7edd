// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

use axum::extract::FromRef;

use bookhive_auth::{AuthConfig, TokenVerifier};

use crate::config::GatewayConfig;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Gateway state: the verifier and one pooled downstream client.
///
/// Both are cheap to clone and hold no mutable state; concurrent requests
/// share them freely.
#[derive(Clone)]
pub struct AppState {
    pub verifier: TokenVerifier,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self, UpstreamError> {
        Ok(Self {
            verifier: TokenVerifier::new(&AuthConfig::new(config.token_secret.clone())),
            upstream: UpstreamClient::new(config)?,
        })
    }
}

// Lets the bookhive-auth extractors pull the verifier out of this state.
impl FromRef<AppState> for TokenVerifier {
    fn from_ref(state: &AppState) -> Self {
        state.verifier.clone()
    }
}
