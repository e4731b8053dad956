//! Membership records
//!
//! This module provides the grant records linking users to organizations
//! and repositories. A membership names exactly one role; the membership
//! management layer keeps at most one record per (user, scope) pair, and
//! the authorization engine only ever reads the role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::roles::Role;

/// Organization membership linking a user to an organization.
///
/// Declared roles at organization scope are `Member` and `Owner`; the
/// policy tables reject anything else at lookup time.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use forge_org::{OrganizationMembership, Role};
///
/// let org_id = Uuid::now_v7();
/// let user_id = Uuid::now_v7();
/// let membership = OrganizationMembership::new(org_id, user_id, Role::Member);
/// assert_eq!(membership.role, Role::Member);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganizationMembership {
    /// Unique membership ID
    pub id: Uuid,

    /// Organization ID
    pub organization_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the organization
    pub role: Role,

    /// When the role was granted
    pub granted_at: DateTime<Utc>,

    /// Who granted the role (if applicable)
    pub granted_by: Option<Uuid>,
}

impl OrganizationMembership {
    /// Creates a new organization membership.
    ///
    /// The membership is created with:
    /// - A newly generated UUID v7 ID
    /// - Current timestamp for granted_at
    ///
    /// # Arguments
    ///
    /// * `organization_id` - The organization ID
    /// * `user_id` - The user ID
    /// * `role` - The user's role in the organization
    ///
    /// # Examples
    ///
    /// ```
    /// use uuid::Uuid;
    /// use forge_org::{OrganizationMembership, Role};
    ///
    /// let org_id = Uuid::now_v7();
    /// let user_id = Uuid::now_v7();
    /// let membership = OrganizationMembership::new(org_id, user_id, Role::Owner);
    /// ```
    pub fn new(organization_id: Uuid, user_id: Uuid, role: Role) -> Self {
        Self {
            id: Uuid::now_v7(),
            organization_id,
            user_id,
            role,
            granted_at: Utc::now(),
            granted_by: None,
        }
    }

    /// Set who granted this role.
    ///
    /// # Arguments
    ///
    /// * `granter_id` - The user ID of who granted the role
    pub fn with_granter(mut self, granter_id: Uuid) -> Self {
        self.granted_by = Some(granter_id);
        self
    }
}

/// Repository membership linking a user to a repository.
///
/// Declared roles at repository scope are `Reader`, `Maintainer`, and
/// `Admin`. A direct repository membership takes precedence over whatever
/// role the user's organization membership would imply.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use forge_org::{RepositoryMembership, Role};
///
/// let repo_id = Uuid::now_v7();
/// let user_id = Uuid::now_v7();
/// let membership = RepositoryMembership::new(repo_id, user_id, Role::Admin);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryMembership {
    /// Unique membership ID
    pub id: Uuid,

    /// Repository ID
    pub repository_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the repository
    pub role: Role,

    /// When the role was granted
    pub granted_at: DateTime<Utc>,

    /// Who granted the role (if applicable)
    pub granted_by: Option<Uuid>,
}

impl RepositoryMembership {
    /// Creates a new repository membership.
    ///
    /// The membership is created with:
    /// - A newly generated UUID v7 ID
    /// - Current timestamp for granted_at
    ///
    /// # Arguments
    ///
    /// * `repository_id` - The repository ID
    /// * `user_id` - The user ID
    /// * `role` - The user's role in the repository
    ///
    /// # Examples
    ///
    /// ```
    /// use uuid::Uuid;
    /// use forge_org::{RepositoryMembership, Role};
    ///
    /// let repo_id = Uuid::now_v7();
    /// let user_id = Uuid::now_v7();
    /// let membership = RepositoryMembership::new(repo_id, user_id, Role::Reader);
    /// ```
    pub fn new(repository_id: Uuid, user_id: Uuid, role: Role) -> Self {
        Self {
            id: Uuid::now_v7(),
            repository_id,
            user_id,
            role,
            granted_at: Utc::now(),
            granted_by: None,
        }
    }

    /// Set who granted this role.
    ///
    /// # Arguments
    ///
    /// * `granter_id` - The user ID of who granted the role
    pub fn with_granter(mut self, granter_id: Uuid) -> Self {
        self.granted_by = Some(granter_id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organization_membership_creation() {
        let org_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        let membership = OrganizationMembership::new(org_id, user_id, Role::Member);

        assert_eq!(membership.organization_id, org_id);
        assert_eq!(membership.user_id, user_id);
        assert_eq!(membership.role, Role::Member);
        assert!(membership.granted_by.is_none());
    }

    #[test]
    fn test_organization_membership_with_granter() {
        let org_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        let granter_id = Uuid::now_v7();

        let membership =
            OrganizationMembership::new(org_id, user_id, Role::Owner).with_granter(granter_id);

        assert_eq!(membership.granted_by, Some(granter_id));
    }

    #[test]
    fn test_repository_membership_creation() {
        let repo_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        let membership = RepositoryMembership::new(repo_id, user_id, Role::Admin);

        assert_eq!(membership.repository_id, repo_id);
        assert_eq!(membership.user_id, user_id);
        assert_eq!(membership.role, Role::Admin);
    }

    #[test]
    fn test_repository_membership_with_granter() {
        let repo_id = Uuid::now_v7();
        let user_id = Uuid::now_v7();
        let granter_id = Uuid::now_v7();

        let membership =
            RepositoryMembership::new(repo_id, user_id, Role::Maintainer).with_granter(granter_id);

        assert_eq!(membership.granted_by, Some(granter_id));
    }
}
