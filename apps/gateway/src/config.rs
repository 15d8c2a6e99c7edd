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
//! | `PORT` | Server bind port | `8000` |
//! | `TOKEN_SECRET` | HMAC secret shared with the user service | insecure dev default |
//! | `USER_SERVICE_URL` | Base URL of the user service | `http://localhost:8001` |
//! | `BOOK_SERVICE_URL` | Base URL of the book service | `http://localhost:8002` |
//! | `READING_SERVICE_URL` | Base URL of the reading service | `http://localhost:8003` |
//! | `UPSTREAM_TIMEOUT_SECS` | Timeout for downstream calls | `10` |
//! | `UPLOAD_TIMEOUT_SECS` | Timeout for file-upload forwards | `60` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

use bookhive_auth::token::DEV_TOKEN_SECRET;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:8001";
const DEFAULT_BOOK_SERVICE_URL: &str = "http://localhost:8002";
const DEFAULT_READING_SERVICE_URL: &str = "http://localhost:8003";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
const DEFAULT_UPLOAD_TIMEOUT_SECS: u64 = 60;

/// Gateway configuration, loaded from the environment at startup.
#[derive(Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    /// Shared HMAC secret for verifying access tokens.
    pub token_secret: String,
    pub user_service_url: String,
    pub book_service_url: String,
    pub reading_service_url: String,
    /// Timeout applied to ordinary downstream calls.
    pub upstream_timeout: Duration,
    /// Longer timeout applied to file-upload forwards.
    pub upload_timeout: Duration,
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        let token_secret = env_optional("TOKEN_SECRET").unwrap_or_else(|| {
            tracing::warn!("TOKEN_SECRET not set; using insecure dev default");
            DEV_TOKEN_SECRET.to_string()
        });

        Self {
            host: env_or_default("HOST", DEFAULT_HOST),
            port: parse_or_default("PORT", DEFAULT_PORT),
            token_secret,
            user_service_url: env_or_default("USER_SERVICE_URL", DEFAULT_USER_SERVICE_URL),
            book_service_url: env_or_default("BOOK_SERVICE_URL", DEFAULT_BOOK_SERVICE_URL),
            reading_service_url: env_or_default(
                "READING_SERVICE_URL",
                DEFAULT_READING_SERVICE_URL,
            ),
            upstream_timeout: Duration::from_secs(parse_or_default(
                "UPSTREAM_TIMEOUT_SECS",
                DEFAULT_UPSTREAM_TIMEOUT_SECS,
            )),
            upload_timeout: Duration::from_secs(parse_or_default(
                "UPLOAD_TIMEOUT_SECS",
                DEFAULT_UPLOAD_TIMEOUT_SECS,
            )),
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

fn env_or_default(name: &str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}

fn parse_or_default<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    env_optional(name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
