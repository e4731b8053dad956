//! Error types for authorization operations
//!
//! This module defines the failure surface of the authorization engine:
//! denials, missing resources, client payload validation, and the internal
//! contract violations that must surface as server faults rather than
//! user-facing responses.

use thiserror::Error;

use forge_org::{ResourceKind, Role};

use crate::actions::Action;
use crate::store::StoreError;

/// Authorization error types.
///
/// Denials carry no contextual detail: a `Forbidden` response that named
/// the failing role or attribute would let a caller enumerate valid roles
/// or probe resource existence. Contract violations (`UnknownRole`,
/// `Unsupported`) are programming errors and must reach a generic fault
/// handler, never be reinterpreted as denials.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// A (kind, role) pair the policy tables never declared
    #[error("Role {role} is not declared for {kind} resources")]
    UnknownRole {
        /// The resource kind the lookup was scoped to
        kind: ResourceKind,
        /// The undeclared role
        role: Role,
    },

    /// A role name in a client payload that is not valid for the kind
    #[error("Invalid role {role:?} for {kind} resources")]
    InvalidRole {
        /// The resource kind the payload targeted
        kind: ResourceKind,
        /// The rejected role string, exactly as received
        role: String,
    },

    /// The actor is not allowed to perform the action
    #[error("forbidden")]
    Forbidden,

    /// The resource does not exist, or sits outside the requested scope
    #[error("not found")]
    NotFound,

    /// A kind-level request with no declared policy
    #[error("No authorization policy for {action} requests against the {kind} kind")]
    Unsupported {
        /// The requested action
        action: Action,
        /// The kind the request targeted
        kind: ResourceKind,
    },

    /// Store failure, propagated unchanged
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for authorization operations.
pub type AuthzResult<T> = Result<T, AuthzError>;

impl AuthzError {
    /// Check if this error should be logged at error level.
    ///
    /// Denials, missing resources, and payload validation failures are
    /// expected traffic and should not be logged as errors.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            AuthzError::UnknownRole { .. } | AuthzError::Unsupported { .. } | AuthzError::Store(_)
        )
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthzError::InvalidRole { .. } => 422,
            AuthzError::Forbidden => 403,
            AuthzError::NotFound => 404,

            AuthzError::UnknownRole { .. }
            | AuthzError::Unsupported { .. }
            | AuthzError::Store(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthzError::UnknownRole { .. } => "UNKNOWN_ROLE",
            AuthzError::InvalidRole { .. } => "INVALID_ROLE",
            AuthzError::Forbidden => "FORBIDDEN",
            AuthzError::NotFound => "NOT_FOUND",
            AuthzError::Unsupported { .. } => "NOT_IMPLEMENTED",
            AuthzError::Store(_) => "STORE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid = AuthzError::InvalidRole {
            kind: ResourceKind::Repository,
            role: "creator".to_string(),
        };
        assert_eq!(invalid.status_code(), 422);
        assert_eq!(AuthzError::Forbidden.status_code(), 403);
        assert_eq!(AuthzError::NotFound.status_code(), 404);

        let unknown = AuthzError::UnknownRole {
            kind: ResourceKind::Organization,
            role: Role::Maintainer,
        };
        assert_eq!(unknown.status_code(), 500);

        let unsupported = AuthzError::Unsupported {
            action: Action::Read,
            kind: ResourceKind::Repository,
        };
        assert_eq!(unsupported.status_code(), 500);
        assert_eq!(unsupported.error_code(), "NOT_IMPLEMENTED");
    }

    #[test]
    fn test_server_error_classification() {
        assert!(AuthzError::UnknownRole {
            kind: ResourceKind::Organization,
            role: Role::Creator,
        }
        .is_server_error());
        assert!(AuthzError::Store(StoreError::Connection("refused".into())).is_server_error());

        assert!(!AuthzError::Forbidden.is_server_error());
        assert!(!AuthzError::NotFound.is_server_error());
        assert!(!AuthzError::InvalidRole {
            kind: ResourceKind::Repository,
            role: "banana".to_string(),
        }
        .is_server_error());
    }

    #[test]
    fn test_denial_carries_no_detail() {
        assert_eq!(AuthzError::Forbidden.to_string(), "forbidden");
        assert_eq!(AuthzError::NotFound.to_string(), "not found");
    }

    #[test]
    fn test_store_errors_pass_through_unchanged() {
        let err: AuthzError = StoreError::Query("timeout while reading memberships".into()).into();
        assert_eq!(err.to_string(), "Query error: timeout while reading memberships");
        assert_eq!(err.error_code(), "STORE_ERROR");
    }
}
