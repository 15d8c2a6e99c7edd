// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! # Runtime Configuration
//!
//! Configuration is loaded from the environment once at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8001` |
//! | `TOKEN_SECRET` | HMAC secret shared with the gateway | insecure dev default |
//! | `TOKEN_TTL_SECS` | Lifetime of issued access tokens | `86400` (24 hours) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::time::Duration;

use bookhive_auth::token::{DEFAULT_TOKEN_LIFETIME, DEV_TOKEN_SECRET};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8001;

/// User service configuration, loaded from the environment at startup.
#[derive(Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Shared HMAC secret for signing access tokens.
    pub token_secret: String,
    /// Lifetime embedded in every issued token.
    pub token_lifetime: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let token_secret = env_optional("TOKEN_SECRET").unwrap_or_else(|| {
            tracing::warn!("TOKEN_SECRET not set; using insecure dev default");
            DEV_TOKEN_SECRET.to_string()
        });

        let token_lifetime = env_optional("TOKEN_TTL_SECS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TOKEN_LIFETIME);

        Self {
            host: env_optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env_optional("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            token_secret,
            token_lifetime,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn env_optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
