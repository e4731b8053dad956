//! Role vocabulary
//!
//! This module defines the role names used across the platform's resource
//! kinds. Which roles a kind actually declares, and which actions each role
//! grants, is policy data owned by `forge-authz`.

use serde::{Deserialize, Serialize};

/// A role name a user can hold on a resource.
///
/// One enum covers every kind's vocabulary so cross-kind inheritance
/// (an organization role implying a repository role, a repository role
/// implying an issue role) is a total function on values rather than a
/// conversion between per-kind types. The declared subset per kind:
///
/// - **Account**: Reader, Owner
/// - **Organization**: Member, Owner
/// - **Repository**: Reader, Maintainer, Admin
/// - **Issue**: Reader, Maintainer, Creator
///
/// Derived ordering is declaration order for use in ordered collections;
/// privilege comparisons go through the policy tables, never through `Ord`.
///
/// # Examples
///
/// ```
/// use forge_org::Role;
///
/// let role = Role::Maintainer;
/// assert_eq!(role.as_str(), "maintainer");
/// assert_eq!(Role::parse("maintainer"), Some(Role::Maintainer));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Read-level access (accounts, repositories, issues)
    Reader,

    /// Base organization membership
    Member,

    /// Elevated repository or issue access
    Maintainer,

    /// Repository administration
    Admin,

    /// Full control of an account or organization
    Owner,

    /// The user who created the resource (issues)
    Creator,
}

impl Role {
    /// Parse a role from its string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Role)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use forge_org::Role;
    ///
    /// assert_eq!(Role::parse("admin"), Some(Role::Admin));
    /// assert_eq!(Role::parse("OWNER"), Some(Role::Owner));
    /// assert_eq!(Role::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reader" => Some(Self::Reader),
            "member" => Some(Self::Member),
            "maintainer" => Some(Self::Maintainer),
            "admin" => Some(Self::Admin),
            "owner" => Some(Self::Owner),
            "creator" => Some(Self::Creator),
            _ => None,
        }
    }

    /// Get the string representation of the role.
    ///
    /// # Returns
    ///
    /// Lowercase string representation
    ///
    /// # Examples
    ///
    /// ```
    /// use forge_org::Role;
    ///
    /// assert_eq!(Role::Admin.as_str(), "admin");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reader => "reader",
            Self::Member => "member",
            Self::Maintainer => "maintainer",
            Self::Admin => "admin",
            Self::Owner => "owner",
            Self::Creator => "creator",
        }
    }

    /// Get a human-readable display name for the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use forge_org::Role;
    ///
    /// assert_eq!(Role::Maintainer.display_name(), "Maintainer");
    /// ```
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Reader => "Reader",
            Self::Member => "Member",
            Self::Maintainer => "Maintainer",
            Self::Admin => "Admin",
            Self::Owner => "Owner",
            Self::Creator => "Creator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(Role::parse("reader"), Some(Role::Reader));
        assert_eq!(Role::parse("member"), Some(Role::Member));
        assert_eq!(Role::parse("maintainer"), Some(Role::Maintainer));
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("OWNER"), Some(Role::Owner));
        assert_eq!(Role::parse("creator"), Some(Role::Creator));
        assert_eq!(Role::parse("invalid"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::Reader.as_str(), "reader");
        assert_eq!(Role::Member.as_str(), "member");
        assert_eq!(Role::Maintainer.as_str(), "maintainer");
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Owner.as_str(), "owner");
        assert_eq!(Role::Creator.as_str(), "creator");
    }

    #[test]
    fn test_role_parse_round_trip() {
        for role in [
            Role::Reader,
            Role::Member,
            Role::Maintainer,
            Role::Admin,
            Role::Owner,
            Role::Creator,
        ] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&Role::Maintainer).unwrap();
        assert_eq!(json, "\"maintainer\"");

        let role: Role = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(role, Role::Owner);
    }
}
