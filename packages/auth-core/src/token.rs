// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Token issuing and verification.
//!
//! Access tokens are HS256-signed JWTs carrying the identity claims
//! described in [`crate::claims`]. The issuer and verifier are built from
//! the same [`AuthConfig`]; both hold only read-only key material, so one
//! instance can be shared freely across concurrent requests.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::claims::{Identity, TokenClaims};
use crate::error::AuthError;

/// Clock skew tolerance for expiry checks (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Default access-token lifetime (24 hours).
pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(24 * 60 * 60);

/// Insecure fallback secret used when `TOKEN_SECRET` is unset.
///
/// Kept in one place so a locally started stack agrees on the secret across
/// processes without configuration. Services log a warning when they fall
/// back to it.
pub const DEV_TOKEN_SECRET: &str = "bookhive-dev-secret";

/// Shared-secret configuration for the token trust domain.
///
/// One `AuthConfig` is loaded per process at startup. The issuing and
/// verifying sides must be constructed from the same secret.
#[derive(Clone)]
pub struct AuthConfig {
    secret: String,
    token_lifetime: Duration,
}

impl AuthConfig {
    /// Create a config with the default 24-hour token lifetime.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            token_lifetime: DEFAULT_TOKEN_LIFETIME,
        }
    }

    /// Override the lifetime embedded in issued tokens.
    pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    /// The lifetime embedded in issued tokens.
    pub fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }
}

/// Issues signed access tokens for verified users.
///
/// Issuing is a pure function of the identity, the secret, and the clock.
/// Every token embeds an expiry; there is no way to mint an unbounded one.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    header: Header,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
            lifetime: config.token_lifetime,
        }
    }

    /// Issue a token for `identity` with the configured lifetime.
    pub fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        self.issue_at(identity, self.lifetime, Utc::now().timestamp())
    }

    /// Issue a token with an explicit lifetime.
    pub fn issue_with_lifetime(
        &self,
        identity: &Identity,
        lifetime: Duration,
    ) -> Result<String, AuthError> {
        self.issue_at(identity, lifetime, Utc::now().timestamp())
    }

    /// Issue a token as of an explicit issue time (seconds since epoch).
    ///
    /// This is the building block the other `issue` variants delegate to;
    /// expiry tests use it to mint already-expired tokens.
    pub fn issue_at(
        &self,
        identity: &Identity,
        lifetime: Duration,
        issued_at: i64,
    ) -> Result<String, AuthError> {
        // Lifetimes beyond i64 seconds (misconfigured TTL env vars) must not
        // wrap negative and mint already-expired tokens.
        let lifetime_secs = i64::try_from(lifetime.as_secs()).unwrap_or(i64::MAX);
        let expires_at = issued_at.saturating_add(lifetime_secs);
        let claims = TokenClaims::new(identity, issued_at, expires_at);

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningFailed(e.to_string()))
    }
}

/// Verifies access tokens and extracts the identity they assert.
///
/// Verification checks, in order: token structure, signature, expiry
/// (with leeway), then presence and shape of the identity claims. A token
/// either yields a complete [`Identity`] or fails entirely; there is no
/// partial trust.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = CLOCK_SKEW_LEEWAY;

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return the identity it carries.
    ///
    /// All failures surface to clients as a 401; the variant records the
    /// precise reason for logs and tests.
    pub fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token verification failed");
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                        AuthError::MalformedClaims
                    }
                    _ => AuthError::MalformedToken,
                }
            })?;

        Identity::try_from(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::Role;
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use serde_json::json;

    const TEST_SECRET: &str = "test-secret-key-for-testing-purposes-only";

    fn test_config() -> AuthConfig {
        AuthConfig::new(TEST_SECRET)
    }

    fn reader_identity() -> Identity {
        Identity {
            email: "reader@example.com".to_string(),
            role: Role::User,
            user_id: "3f4d6542-b8ce-4226-93d3-80d6f14d6db2".to_string(),
        }
    }

    /// Sign an arbitrary claim payload with the test secret.
    fn sign_raw(claims: serde_json::Value) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issue_and_verify_round_trips_identity() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);
        let identity = reader_identity();

        let token = issuer.issue(&identity).unwrap();
        let verified = verifier.verify(&token).unwrap();

        assert_eq!(verified, identity);
    }

    #[test]
    fn issued_tokens_have_three_segments() {
        let issuer = TokenIssuer::new(&test_config());
        let token = issuer.issue(&reader_identity()).unwrap();
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn default_lifetime_is_24_hours() {
        let issuer = TokenIssuer::new(&test_config());
        let token = issuer.issue(&reader_identity()).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let decoded = URL_SAFE_NO_PAD.decode(payload).unwrap();
        let claims: serde_json::Value = serde_json::from_slice(&decoded).unwrap();

        let iat = claims["iat"].as_i64().unwrap();
        let exp = claims["exp"].as_i64().unwrap();
        assert_eq!(exp - iat, 24 * 60 * 60);
    }

    #[test]
    fn payload_uses_the_wire_claim_names() {
        let issuer = TokenIssuer::new(&test_config());
        let token = issuer.issue(&reader_identity()).unwrap();

        let payload = token.split('.').nth(1).unwrap();
        let decoded = URL_SAFE_NO_PAD.decode(payload).unwrap();
        let claims: serde_json::Value = serde_json::from_slice(&decoded).unwrap();

        assert_eq!(claims["sub"], "reader@example.com");
        assert_eq!(claims["role"], "user");
        assert_eq!(claims["id"], "3f4d6542-b8ce-4226-93d3-80d6f14d6db2");
    }

    #[test]
    fn verify_rejects_expired_token() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);

        // Issued 25 hours ago with a 24-hour lifetime, well past the leeway.
        let issued_at = Utc::now().timestamp() - 25 * 60 * 60;
        let token = issuer
            .issue_at(&reader_identity(), DEFAULT_TOKEN_LIFETIME, issued_at)
            .unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn verify_honors_explicit_lifetime() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);

        // A 10-minute token issued an hour ago is expired...
        let issued_at = Utc::now().timestamp() - 60 * 60;
        let short = issuer
            .issue_at(&reader_identity(), Duration::from_secs(600), issued_at)
            .unwrap();
        assert!(matches!(
            verifier.verify(&short),
            Err(AuthError::TokenExpired)
        ));

        // ...while a 2-hour token issued at the same moment still verifies.
        let long = issuer
            .issue_at(&reader_identity(), Duration::from_secs(2 * 60 * 60), issued_at)
            .unwrap();
        assert!(verifier.verify(&long).is_ok());
    }

    #[test]
    fn oversized_lifetime_saturates_instead_of_wrapping() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);

        // A lifetime that overflows i64 seconds must still yield a token
        // that verifies, not one expired before it was issued.
        let token = issuer
            .issue_with_lifetime(&reader_identity(), Duration::from_secs(u64::MAX))
            .unwrap();
        assert!(verifier.verify(&token).is_ok());

        let payload = token.split('.').nth(1).unwrap();
        let decoded = URL_SAFE_NO_PAD.decode(payload).unwrap();
        let claims: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(claims["exp"].as_i64().unwrap(), i64::MAX);
    }

    #[test]
    fn verify_rejects_token_signed_with_other_secret() {
        let issuer = TokenIssuer::new(&AuthConfig::new("secret-A"));
        let verifier = TokenVerifier::new(&AuthConfig::new("secret-B"));

        let token = issuer.issue(&reader_identity()).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn verify_rejects_tampered_signature() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);

        let token = issuer.issue(&reader_identity()).unwrap();
        let (rest, signature) = token.rsplit_once('.').unwrap();

        // Flip one character in the middle of the signature segment. Staying
        // inside the base64url alphabet keeps the segment decodable, so the
        // failure is the signature check itself.
        let mut chars: Vec<char> = signature.chars().collect();
        chars[10] = if chars[10] == 'A' { 'B' } else { 'A' };
        let tampered: String = chars.into_iter().collect();

        assert!(matches!(
            verifier.verify(&format!("{rest}.{tampered}")),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let config = test_config();
        let issuer = TokenIssuer::new(&config);
        let verifier = TokenVerifier::new(&config);

        let token = issuer.issue(&reader_identity()).unwrap();
        let parts: Vec<&str> = token.split('.').collect();

        // Swap the payload for one claiming the admin role, keeping the
        // original signature. The signature no longer covers the payload.
        let exp = Utc::now().timestamp() + 3600;
        let forged_payload = URL_SAFE_NO_PAD.encode(
            json!({
                "sub": "reader@example.com",
                "role": "admin",
                "id": "3f4d6542-b8ce-4226-93d3-80d6f14d6db2",
                "iat": exp - 3600,
                "exp": exp,
            })
            .to_string(),
        );

        let forged = format!("{}.{}.{}", parts[0], forged_payload, parts[2]);
        assert!(matches!(
            verifier.verify(&forged),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn verify_rejects_missing_identity_claims() {
        let verifier = TokenVerifier::new(&test_config());
        let exp = Utc::now().timestamp() + 3600;

        // Well-signed tokens, each missing one identity claim.
        let missing_id = sign_raw(json!({
            "sub": "reader@example.com",
            "role": "user",
            "exp": exp,
        }));
        let missing_role = sign_raw(json!({
            "sub": "reader@example.com",
            "id": "user-1",
            "exp": exp,
        }));
        let missing_email = sign_raw(json!({
            "role": "user",
            "id": "user-1",
            "exp": exp,
        }));

        for token in [missing_id, missing_role, missing_email] {
            assert!(matches!(
                verifier.verify(&token),
                Err(AuthError::MalformedClaims)
            ));
        }
    }

    #[test]
    fn verify_rejects_null_and_empty_claims() {
        let verifier = TokenVerifier::new(&test_config());
        let exp = Utc::now().timestamp() + 3600;

        let null_id = sign_raw(json!({
            "sub": "reader@example.com",
            "role": "user",
            "id": null,
            "exp": exp,
        }));
        let empty_email = sign_raw(json!({
            "sub": "",
            "role": "user",
            "id": "user-1",
            "exp": exp,
        }));

        for token in [null_id, empty_email] {
            assert!(matches!(
                verifier.verify(&token),
                Err(AuthError::MalformedClaims)
            ));
        }
    }

    #[test]
    fn verify_rejects_unknown_role_claim() {
        let verifier = TokenVerifier::new(&test_config());
        let token = sign_raw(json!({
            "sub": "reader@example.com",
            "role": "superuser",
            "id": "user-1",
            "exp": Utc::now().timestamp() + 3600,
        }));

        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn verify_rejects_token_without_expiry() {
        let verifier = TokenVerifier::new(&test_config());
        let token = sign_raw(json!({
            "sub": "reader@example.com",
            "role": "user",
            "id": "user-1",
        }));

        assert!(matches!(
            verifier.verify(&token),
            Err(AuthError::MalformedClaims)
        ));
    }

    #[test]
    fn verify_rejects_garbage_input() {
        let verifier = TokenVerifier::new(&test_config());

        for garbage in ["", "not-a-token", "a.b", "a.b.c.d", "🔑🔑🔑"] {
            assert!(matches!(
                verifier.verify(garbage),
                Err(AuthError::MalformedToken)
            ));
        }
    }
}
