// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! User roles for authorization.

use serde::{Deserialize, Serialize};

/// User roles for authorization.
///
/// Role checks are strict equality: a route that requires `Admin` admits
/// admins and nobody else, and a route that requires nothing admits every
/// authenticated user. There is no privilege hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full administrative access (catalog management)
    Admin,
    /// Normal library user (owns reading progress)
    User,
}

impl Role {
    /// Parse a role from its string form (case-insensitive).
    /// Used when extracting the `role` claim from a token.
    pub fn from_str(s: &str) -> Option<Role> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}

impl Default for Role {
    /// Default role is User (least privilege for authenticated users).
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::User => write!(f, "user"),
        }
    }
}
