//! Ownership check: may the authenticated principal read the requested owner's resources?
//!
//! Plain string equality. No case folding, no partial matches.
use std::str::FromStr;

use crate::error::AppError;
use crate::services::auth::credential::Principal;

/// What to do when the caller names no target owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingTargetPolicy {
    /// Scope the query to the principal's own resources.
    #[default]
    SelfScope,
    /// Skip the check; every resource is addressable.
    Unscoped,
}

impl FromStr for MissingTargetPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "self" | "self_scope" => Ok(Self::SelfScope),
            "unscoped" | "all" => Ok(Self::Unscoped),
            _ => Err(()),
        }
    }
}

/// Outcome of a successful ownership check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerScope {
    /// Only resources owned by this email.
    Owner(String),
    Unscoped,
}

impl OwnerScope {
    pub fn owner(&self) -> Option<&str> {
        match self {
            Self::Owner(email) => Some(email),
            Self::Unscoped => None,
        }
    }
}

pub fn authorize_owner(
    principal: &Principal,
    target: Option<&str>,
    policy: MissingTargetPolicy,
) -> Result<OwnerScope, AppError> {
    match target {
        Some(target) if target == principal.as_str() => Ok(OwnerScope::Owner(target.to_string())),
        Some(_) => {
            tracing::warn!("ownership check failed: target owner differs from principal");
            Err(AppError::Forbidden)
        }
        None => match policy {
            MissingTargetPolicy::SelfScope => {
                Ok(OwnerScope::Owner(principal.as_str().to_string()))
            }
            MissingTargetPolicy::Unscoped => Ok(OwnerScope::Unscoped),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Principal {
        Principal::new("a@x.com").unwrap()
    }

    #[test]
    fn matching_target_is_authorized() {
        let scope = authorize_owner(&alice(), Some("a@x.com"), MissingTargetPolicy::SelfScope);
        assert_eq!(scope.unwrap(), OwnerScope::Owner("a@x.com".into()));
    }

    #[test]
    fn other_target_is_forbidden() {
        let res = authorize_owner(&alice(), Some("b@x.com"), MissingTargetPolicy::Unscoped);
        assert!(matches!(res, Err(AppError::Forbidden)));
    }

    #[test]
    fn comparison_is_case_sensitive_and_exact() {
        for target in ["A@x.com", "a@x.com ", "a@x", ""] {
            let res = authorize_owner(&alice(), Some(target), MissingTargetPolicy::SelfScope);
            assert!(matches!(res, Err(AppError::Forbidden)), "{target:?} allowed");
        }
    }

    #[test]
    fn missing_target_follows_policy() {
        let scope = authorize_owner(&alice(), None, MissingTargetPolicy::SelfScope).unwrap();
        assert_eq!(scope.owner(), Some("a@x.com"));

        let scope = authorize_owner(&alice(), None, MissingTargetPolicy::Unscoped).unwrap();
        assert_eq!(scope, OwnerScope::Unscoped);
        assert_eq!(scope.owner(), None);
    }

    #[test]
    fn policy_parses_from_config_values() {
        assert_eq!("self".parse::<MissingTargetPolicy>(), Ok(MissingTargetPolicy::SelfScope));
        assert_eq!("Unscoped".parse::<MissingTargetPolicy>(), Ok(MissingTargetPolicy::Unscoped));
        assert!("deny".parse::<MissingTargetPolicy>().is_err());
    }
}
