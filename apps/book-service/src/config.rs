// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! # Runtime Configuration
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8002` |
//! | `SEED_BOOKS` | Seed the catalog with two classics when empty | `true` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8002;

#[derive(Clone)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub seed_books: bool,
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        Self {
            host: env_optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: env_optional("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            seed_books: env_optional("SEED_BOOKS")
                .map(|v| v != "false")
                .unwrap_or(true),
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
