// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Token claims and the verified identity they carry.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::roles::Role;

/// Claims embedded in a Bookhive access token.
///
/// Field names follow the wire format: `sub` carries the user's email and
/// `id` the canonical user id. The identity fields are optional at the serde
/// layer so that verification can tell a well-signed token with missing
/// claims apart from one that fails to decode at all; the conversion to
/// [`Identity`] is where presence is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user's email address
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Role name (`user` or `admin`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Canonical user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Issued-at (seconds since epoch)
    #[serde(default)]
    pub iat: i64,

    /// Expiry (seconds since epoch). Optional at the serde layer so a
    /// well-signed token without one reaches the verifier's required-claim
    /// check instead of dying as a decode error; issued tokens always set it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl TokenClaims {
    /// Build the claim set for an identity, issued at `iat` and expiring at `exp`.
    pub fn new(identity: &Identity, iat: i64, exp: i64) -> Self {
        Self {
            sub: Some(identity.email.clone()),
            role: Some(identity.role.to_string()),
            id: Some(identity.user_id.clone()),
            iat,
            exp: Some(exp),
        }
    }
}

/// Verified identity attached to a request after token verification.
///
/// This is the primary type used throughout the services to represent the
/// authenticated user making a request. It exists only once a token has
/// passed signature, expiry, and claim-presence checks; scoped to one
/// request and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// The user's email address (token `sub` claim)
    pub email: String,
    /// The user's role
    pub role: Role,
    /// Canonical user id (token `id` claim)
    pub user_id: String,
}

impl TryFrom<TokenClaims> for Identity {
    type Error = AuthError;

    /// Promote a decoded claim set to a verified identity.
    ///
    /// Every identity claim must be present and non-empty, and the role must
    /// name a known role. Anything less is rejected outright even though the
    /// signature already checked out.
    fn try_from(claims: TokenClaims) -> Result<Self, Self::Error> {
        let email = non_empty(claims.sub).ok_or(AuthError::MalformedClaims)?;
        let role = non_empty(claims.role)
            .and_then(|raw| Role::from_str(&raw))
            .ok_or(AuthError::MalformedClaims)?;
        let user_id = non_empty(claims.id).ok_or(AuthError::MalformedClaims)?;

        Ok(Identity {
            email,
            role,
            user_id,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_claims() -> TokenClaims {
        TokenClaims {
            sub: Some("reader@example.com".to_string()),
            role: Some("user".to_string()),
            id: Some("3f4d6542-b8ce-4226-93d3-80d6f14d6db2".to_string()),
            iat: 1700000000,
            exp: Some(1700086400),
        }
    }

    #[test]
    fn try_from_extracts_all_identity_fields() {
        let identity = Identity::try_from(sample_claims()).unwrap();
        assert_eq!(identity.email, "reader@example.com");
        assert_eq!(identity.role, Role::User);
        assert_eq!(identity.user_id, "3f4d6542-b8ce-4226-93d3-80d6f14d6db2");
    }

    #[test]
    fn try_from_rejects_missing_email() {
        let mut claims = sample_claims();
        claims.sub = None;
        assert!(matches!(
            Identity::try_from(claims),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn try_from_rejects_missing_role() {
        let mut claims = sample_claims();
        claims.role = None;
        assert!(matches!(
            Identity::try_from(claims),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn try_from_rejects_missing_user_id() {
        let mut claims = sample_claims();
        claims.id = None;
        assert!(matches!(
            Identity::try_from(claims),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn try_from_rejects_empty_strings() {
        let mut claims = sample_claims();
        claims.sub = Some("   ".to_string());
        assert!(matches!(
            Identity::try_from(claims),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn try_from_rejects_unknown_role() {
        let mut claims = sample_claims();
        claims.role = Some("superuser".to_string());
        assert!(matches!(
            Identity::try_from(claims),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn new_round_trips_through_try_from() {
        let identity = Identity {
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            user_id: "admin-1".to_string(),
        };
        let claims = TokenClaims::new(&identity, 1700000000, 1700086400);
        assert_eq!(Identity::try_from(claims).unwrap(), identity);
    }
}
