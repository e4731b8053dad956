//! Resource identity
//!
//! This module defines the resource kinds the platform authorizes and the
//! reference type that carries exactly the identity an authorization
//! decision needs. References are plain `Copy` values: the engine never
//! holds entity rows, only the ids and scope links resolution reads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kinds of resource the platform authorizes.
///
/// This is a closed set: every kind is handled exhaustively by the
/// authorization engine, so adding a kind is a compile-checked change.
/// Unrecognized kind names exist only at the string boundary, where
/// [`ResourceKind::parse`] returns `None`.
///
/// # Examples
///
/// ```
/// use forge_org::ResourceKind;
///
/// assert_eq!(ResourceKind::parse("repository"), Some(ResourceKind::Repository));
/// assert_eq!(ResourceKind::Issue.as_str(), "issue");
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A user account and its profile
    Account,

    /// A top-level tenant owning repositories
    Organization,

    /// A repository within an organization
    Repository,

    /// An issue within a repository
    Issue,
}

impl ResourceKind {
    /// Get the string representation of the kind.
    ///
    /// # Returns
    ///
    /// A static lowercase string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Account => "account",
            ResourceKind::Organization => "organization",
            ResourceKind::Repository => "repository",
            ResourceKind::Issue => "issue",
        }
    }

    /// Parse a kind from its string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(ResourceKind)` if valid, `None` otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use forge_org::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::parse("account"), Some(ResourceKind::Account));
    /// assert_eq!(ResourceKind::parse("ISSUE"), Some(ResourceKind::Issue));
    /// assert_eq!(ResourceKind::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "account" => Some(ResourceKind::Account),
            "organization" => Some(ResourceKind::Organization),
            "repository" => Some(ResourceKind::Repository),
            "issue" => Some(ResourceKind::Issue),
            _ => None,
        }
    }

    /// Get all resource kinds.
    ///
    /// # Returns
    ///
    /// A vector containing every kind.
    pub fn all() -> Vec<Self> {
        vec![
            ResourceKind::Account,
            ResourceKind::Organization,
            ResourceKind::Repository,
            ResourceKind::Issue,
        ]
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference to one resource instance, carrying the identity and scope
/// links authorization resolution reads.
///
/// Each variant holds its own id plus the parent ids resolution walks:
/// a repository knows its organization, an issue knows its repository,
/// that repository's organization, and its creator. Nothing else about
/// the entity crosses into the engine.
///
/// Serialized with an internal `kind` tag so references are self-describing
/// on the wire.
///
/// # Examples
///
/// ```
/// use uuid::Uuid;
/// use forge_org::{ResourceKind, ResourceRef};
///
/// let org_id = Uuid::now_v7();
/// let repo = ResourceRef::repository(Uuid::now_v7(), org_id);
/// assert_eq!(repo.kind(), ResourceKind::Repository);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceRef {
    /// A user account
    Account {
        /// The account's user id
        id: Uuid,
    },

    /// An organization
    Organization {
        /// The organization id
        id: Uuid,
    },

    /// A repository, scoped to its organization
    Repository {
        /// The repository id
        id: Uuid,
        /// The owning organization
        organization_id: Uuid,
    },

    /// An issue, scoped to its repository
    Issue {
        /// The issue id
        id: Uuid,
        /// The repository the issue belongs to
        repository_id: Uuid,
        /// The organization owning that repository
        organization_id: Uuid,
        /// The user who opened the issue
        creator_id: Uuid,
    },
}

impl ResourceRef {
    /// Reference a user account.
    pub fn account(id: Uuid) -> Self {
        Self::Account { id }
    }

    /// Reference an organization.
    pub fn organization(id: Uuid) -> Self {
        Self::Organization { id }
    }

    /// Reference a repository within an organization.
    ///
    /// # Arguments
    ///
    /// * `id` - The repository id
    /// * `organization_id` - The owning organization
    pub fn repository(id: Uuid, organization_id: Uuid) -> Self {
        Self::Repository {
            id,
            organization_id,
        }
    }

    /// Reference an issue within a repository.
    ///
    /// An issue reference carries its whole scope chain: the repository it
    /// belongs to and the organization owning that repository, so inherited
    /// access can be resolved from the reference alone.
    ///
    /// # Arguments
    ///
    /// * `id` - The issue id
    /// * `repository_id` - The repository the issue belongs to
    /// * `organization_id` - The organization owning that repository
    /// * `creator_id` - The user who opened the issue
    pub fn issue(id: Uuid, repository_id: Uuid, organization_id: Uuid, creator_id: Uuid) -> Self {
        Self::Issue {
            id,
            repository_id,
            organization_id,
            creator_id,
        }
    }

    /// Get the kind of the referenced resource.
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceRef::Account { .. } => ResourceKind::Account,
            ResourceRef::Organization { .. } => ResourceKind::Organization,
            ResourceRef::Repository { .. } => ResourceKind::Repository,
            ResourceRef::Issue { .. } => ResourceKind::Issue,
        }
    }

    /// Get the referenced resource's own id.
    pub fn id(&self) -> Uuid {
        match self {
            ResourceRef::Account { id }
            | ResourceRef::Organization { id }
            | ResourceRef::Repository { id, .. }
            | ResourceRef::Issue { id, .. } => *id,
        }
    }
}

/// Anything that can stand in for a resource in an authorization question.
///
/// Entity row types owned by the application implement this so listing
/// helpers can authorize them without this crate knowing their shape.
/// [`ResourceRef`] implements it trivially.
pub trait Resource {
    /// The authorization-relevant reference for this value.
    fn resource_ref(&self) -> ResourceRef;
}

impl Resource for ResourceRef {
    fn resource_ref(&self) -> ResourceRef {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parse() {
        assert_eq!(ResourceKind::parse("account"), Some(ResourceKind::Account));
        assert_eq!(
            ResourceKind::parse("organization"),
            Some(ResourceKind::Organization)
        );
        assert_eq!(
            ResourceKind::parse("Repository"),
            Some(ResourceKind::Repository)
        );
        assert_eq!(ResourceKind::parse("ISSUE"), Some(ResourceKind::Issue));
        assert_eq!(ResourceKind::parse("invalid"), None);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in ResourceKind::all() {
            assert_eq!(ResourceKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_ref_kind() {
        let id = Uuid::now_v7();
        let repo = Uuid::now_v7();
        let org = Uuid::now_v7();
        let creator = Uuid::now_v7();

        assert_eq!(ResourceRef::account(id).kind(), ResourceKind::Account);
        assert_eq!(
            ResourceRef::organization(id).kind(),
            ResourceKind::Organization
        );
        assert_eq!(
            ResourceRef::repository(id, org).kind(),
            ResourceKind::Repository
        );
        assert_eq!(
            ResourceRef::issue(id, repo, org, creator).kind(),
            ResourceKind::Issue
        );
    }

    #[test]
    fn test_ref_id() {
        let id = Uuid::now_v7();
        let parent = Uuid::now_v7();
        assert_eq!(ResourceRef::account(id).id(), id);
        assert_eq!(ResourceRef::repository(id, parent).id(), id);
    }

    #[test]
    fn test_ref_serializes_with_kind_tag() {
        let id = Uuid::now_v7();
        let org_id = Uuid::now_v7();
        let value = serde_json::to_value(ResourceRef::repository(id, org_id)).unwrap();

        assert_eq!(value["kind"], "repository");
        assert_eq!(value["id"], id.to_string());
        assert_eq!(value["organization_id"], org_id.to_string());
    }

    #[test]
    fn test_resource_trait_identity() {
        let r = ResourceRef::organization(Uuid::now_v7());
        assert_eq!(r.resource_ref(), r);
    }
}
