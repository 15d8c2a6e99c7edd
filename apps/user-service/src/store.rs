// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! In-memory credential store.
//!
//! Relational persistence is out of scope; the store keeps the same shape a
//! `users` table would (unique id, unique email, hashed password, role) so
//! the service API does not change when one is added.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use bookhive_auth::Role;

use crate::error::ApiError;

/// A stored user. The password hash never leaves the store's service.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, safe to return from the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRecord> for PublicUser {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Default)]
pub struct CredentialStore {
    // Keyed by user id; emails are enforced unique on insert.
    users: HashMap<String, UserRecord>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user. Fails if the email is already registered.
    pub fn create_user(
        &mut self,
        name: String,
        email: String,
        password_hash: String,
        role: Role,
    ) -> Result<UserRecord, ApiError> {
        if self.find_by_email(&email).is_some() {
            return Err(ApiError::conflict("Email is already registered"));
        }

        let user = UserRecord {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            password_hash,
            role,
            created_at: Utc::now(),
        };
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    /// Look up a user by email (the login key).
    pub fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users.values().find(|user| user.email == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_reader() -> CredentialStore {
        let mut store = CredentialStore::new();
        store
            .create_user(
                "Reader".to_string(),
                "reader@example.com".to_string(),
                "$argon2-hash".to_string(),
                Role::User,
            )
            .unwrap();
        store
    }

    #[test]
    fn create_user_assigns_uuid_and_timestamp() {
        let mut store = CredentialStore::new();
        let user = store
            .create_user(
                "Reader".to_string(),
                "reader@example.com".to_string(),
                "$argon2-hash".to_string(),
                Role::User,
            )
            .unwrap();

        assert!(Uuid::parse_str(&user.id).is_ok());
        assert_eq!(user.role, Role::User);
    }

    #[test]
    fn duplicate_email_is_rejected() {
        let mut store = store_with_reader();
        let result = store.create_user(
            "Impostor".to_string(),
            "reader@example.com".to_string(),
            "$other-hash".to_string(),
            Role::User,
        );
        assert!(result.is_err());
    }

    #[test]
    fn find_by_email_matches_exactly() {
        let store = store_with_reader();
        assert!(store.find_by_email("reader@example.com").is_some());
        assert!(store.find_by_email("other@example.com").is_none());
    }

    #[test]
    fn public_view_omits_the_password_hash() {
        let store = store_with_reader();
        let user = store.find_by_email("reader@example.com").unwrap();
        let public = PublicUser::from(user);

        let json = serde_json::to_value(&public).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "reader@example.com");
    }
}
