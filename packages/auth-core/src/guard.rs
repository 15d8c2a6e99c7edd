// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Bookhive Contributors

//! Route-level authorization checks.
//!
//! The guard consumes an already-verified [`Identity`] and decides
//! allow/deny for one request. It is a pure function: routes state their
//! requirements, the guard compares them against the identity, nothing is
//! persisted or mutated.

use crate::claims::Identity;
use crate::error::AuthError;
use crate::roles::Role;

/// Authorize `identity` against a route's requirements.
///
/// - `required_role`: when set, the identity's role must equal it exactly.
///   There is no hierarchy; an admin does not satisfy a user-role
///   requirement, nor the reverse.
/// - `owner_id`: when set, the identity must own the resource, compared as
///   canonical strings via [`is_owner`].
///
/// The checks are independent; a route may require either, both, or
/// neither. Role is checked first, so a caller failing both sees the role
/// failure.
pub fn authorize(
    identity: &Identity,
    owner_id: Option<&str>,
    required_role: Option<Role>,
) -> Result<(), AuthError> {
    if let Some(required) = required_role {
        if identity.role != required {
            return Err(AuthError::InsufficientRole);
        }
    }

    if let Some(owner_id) = owner_id {
        if !is_owner(identity, owner_id) {
            return Err(AuthError::NotResourceOwner);
        }
    }

    Ok(())
}

/// Whether `identity` owns the resource labelled with `owner_id`.
///
/// Ownership is a canonical string comparison: both sides are trimmed, and
/// numeric ids must be rendered as decimal strings before they get here.
pub fn is_owner(identity: &Identity, owner_id: &str) -> bool {
    identity.user_id.trim() == owner_id.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role, user_id: &str) -> Identity {
        Identity {
            email: "reader@example.com".to_string(),
            role,
            user_id: user_id.to_string(),
        }
    }

    #[test]
    fn no_requirements_allows_any_authenticated_user() {
        let user = identity(Role::User, "42");
        assert!(authorize(&user, None, None).is_ok());
    }

    #[test]
    fn owner_check_allows_matching_id() {
        let user = identity(Role::User, "42");
        assert!(authorize(&user, Some("42"), None).is_ok());
    }

    #[test]
    fn owner_check_denies_other_id() {
        let user = identity(Role::User, "42");
        assert!(matches!(
            authorize(&user, Some("43"), None),
            Err(AuthError::NotResourceOwner)
        ));
    }

    #[test]
    fn owner_check_trims_both_sides() {
        let user = identity(Role::User, " 42 ");
        assert!(authorize(&user, Some("42"), None).is_ok());
        assert!(authorize(&identity(Role::User, "42"), Some(" 42\n"), None).is_ok());
    }

    #[test]
    fn admin_does_not_bypass_ownership() {
        let admin = identity(Role::Admin, "admin-1");
        assert!(matches!(
            authorize(&admin, Some("42"), None),
            Err(AuthError::NotResourceOwner)
        ));
    }

    #[test]
    fn role_check_requires_exact_match() {
        let user = identity(Role::User, "42");
        let admin = identity(Role::Admin, "admin-1");

        assert!(authorize(&admin, None, Some(Role::Admin)).is_ok());
        assert!(matches!(
            authorize(&user, None, Some(Role::Admin)),
            Err(AuthError::InsufficientRole)
        ));
        // Strict equality cuts both ways.
        assert!(matches!(
            authorize(&admin, None, Some(Role::User)),
            Err(AuthError::InsufficientRole)
        ));
    }

    #[test]
    fn combined_requirements_must_both_hold() {
        let admin = identity(Role::Admin, "admin-1");

        assert!(authorize(&admin, Some("admin-1"), Some(Role::Admin)).is_ok());
        assert!(matches!(
            authorize(&admin, Some("someone-else"), Some(Role::Admin)),
            Err(AuthError::NotResourceOwner)
        ));
    }

    #[test]
    fn role_failure_reported_before_ownership() {
        let user = identity(Role::User, "42");
        assert!(matches!(
            authorize(&user, Some("43"), Some(Role::Admin)),
            Err(AuthError::InsufficientRole)
        ));
    }
}
