//! Store seams
//!
//! This module defines the read-only collaborator traits the engine and
//! the access helpers depend on: membership lookups for role resolution,
//! and scoped resource lookups for gated fetches and listings. The
//! in-memory implementation backs tests and single-process use.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use forge_org::{ResourceRef, Role};

use crate::listing::RoleFilter;

/// Store error types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the backing store
    #[error("Connection error: {0}")]
    Connection(String),

    /// The backing store rejected the query
    #[error("Query error: {0}")]
    Query(String),

    /// A row could not be decoded into a domain value
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Membership lookups the role resolver reads.
///
/// Implemented by the persistence layer. At most one role exists per
/// (user, scope) pair; `None` means no grant. The resolver never writes.
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// The user's role in an organization, if any.
    async fn organization_role(
        &self,
        user_id: Uuid,
        organization_id: Uuid,
    ) -> StoreResult<Option<Role>>;

    /// The user's direct role on a repository, if any.
    async fn repository_role(
        &self,
        user_id: Uuid,
        repository_id: Uuid,
    ) -> StoreResult<Option<Role>>;
}

/// Scoped resource lookups for gated access and listings.
///
/// Scoped lookups answer `None` both for a missing resource and for one
/// that exists under a different parent; callers cannot tell the two
/// apart, which is what keeps nested paths unprobeable.
#[async_trait]
pub trait ResourceStore: Send + Sync {
    /// Fetch an organization by id.
    async fn organization(&self, id: Uuid) -> StoreResult<Option<ResourceRef>>;

    /// Fetch a repository by id, scoped to an organization.
    async fn repository(
        &self,
        organization_id: Uuid,
        id: Uuid,
    ) -> StoreResult<Option<ResourceRef>>;

    /// Fetch an issue by id, scoped to a repository.
    async fn issue(&self, repository_id: Uuid, id: Uuid) -> StoreResult<Option<ResourceRef>>;

    /// The repositories a user can reach under a role filter.
    ///
    /// A repository qualifies when the user's direct repository role is in
    /// `filter.repository_roles`, or the user has no direct role on it and
    /// their organization role is in `filter.organization_roles`. A direct
    /// role outside the filter disqualifies the repository even when the
    /// organization role would pass: direct grants take precedence over
    /// inherited ones here exactly as they do in role resolution.
    async fn repositories_for_actor(
        &self,
        user_id: Uuid,
        filter: &RoleFilter,
    ) -> StoreResult<Vec<ResourceRef>>;
}

#[cfg(feature = "memory")]
pub mod memory {
    //! In-memory store for single-process applications and testing.

    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;

    use tokio::sync::RwLock;

    use super::*;

    /// In-memory implementation of both store traits.
    ///
    /// Clones share one dataset, so a fixture can keep populating the
    /// store after handing a clone to the engine. Suitable for tests and
    /// single-process applications; production deployments implement the
    /// traits against their database instead.
    #[derive(Clone, Default)]
    pub struct MemoryStore {
        inner: Arc<RwLock<Inner>>,
    }

    #[derive(Default)]
    struct Inner {
        /// known organization ids
        organizations: HashSet<Uuid>,
        /// repository id -> owning organization
        repositories: HashMap<Uuid, Uuid>,
        /// issue id -> (repository, creator)
        issues: HashMap<Uuid, (Uuid, Uuid)>,
        /// (user, organization) -> role
        organization_roles: HashMap<(Uuid, Uuid), Role>,
        /// (user, repository) -> role
        repository_roles: HashMap<(Uuid, Uuid), Role>,
    }

    impl std::fmt::Debug for MemoryStore {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("MemoryStore").finish()
        }
    }

    impl MemoryStore {
        /// Create a new empty in-memory store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Add an organization.
        pub async fn add_organization(&self, id: Uuid) {
            let mut inner = self.inner.write().await;
            inner.organizations.insert(id);
        }

        /// Add a repository under an organization.
        pub async fn add_repository(&self, id: Uuid, organization_id: Uuid) {
            let mut inner = self.inner.write().await;
            inner.repositories.insert(id, organization_id);
        }

        /// Add an issue under a repository.
        ///
        /// The issue's organization is resolved through the repository at
        /// lookup time, so the repository stays the single source of truth
        /// for the scope chain.
        pub async fn add_issue(&self, id: Uuid, repository_id: Uuid, creator_id: Uuid) {
            let mut inner = self.inner.write().await;
            inner.issues.insert(id, (repository_id, creator_id));
        }

        /// Grant a user a role in an organization, replacing any previous
        /// grant.
        pub async fn grant_organization_role(
            &self,
            user_id: Uuid,
            organization_id: Uuid,
            role: Role,
        ) {
            let mut inner = self.inner.write().await;
            inner
                .organization_roles
                .insert((user_id, organization_id), role);
        }

        /// Grant a user a direct role on a repository, replacing any
        /// previous grant.
        pub async fn grant_repository_role(&self, user_id: Uuid, repository_id: Uuid, role: Role) {
            let mut inner = self.inner.write().await;
            inner
                .repository_roles
                .insert((user_id, repository_id), role);
        }

        /// Every repository in the store.
        pub async fn all_repositories(&self) -> Vec<ResourceRef> {
            let inner = self.inner.read().await;
            inner
                .repositories
                .iter()
                .map(|(id, organization_id)| ResourceRef::repository(*id, *organization_id))
                .collect()
        }
    }

    #[async_trait]
    impl MembershipStore for MemoryStore {
        async fn organization_role(
            &self,
            user_id: Uuid,
            organization_id: Uuid,
        ) -> StoreResult<Option<Role>> {
            let inner = self.inner.read().await;
            Ok(inner
                .organization_roles
                .get(&(user_id, organization_id))
                .copied())
        }

        async fn repository_role(
            &self,
            user_id: Uuid,
            repository_id: Uuid,
        ) -> StoreResult<Option<Role>> {
            let inner = self.inner.read().await;
            Ok(inner
                .repository_roles
                .get(&(user_id, repository_id))
                .copied())
        }
    }

    #[async_trait]
    impl ResourceStore for MemoryStore {
        async fn organization(&self, id: Uuid) -> StoreResult<Option<ResourceRef>> {
            let inner = self.inner.read().await;
            Ok(inner
                .organizations
                .contains(&id)
                .then(|| ResourceRef::organization(id)))
        }

        async fn repository(
            &self,
            organization_id: Uuid,
            id: Uuid,
        ) -> StoreResult<Option<ResourceRef>> {
            let inner = self.inner.read().await;
            Ok(inner
                .repositories
                .get(&id)
                .filter(|owner| **owner == organization_id)
                .map(|owner| ResourceRef::repository(id, *owner)))
        }

        async fn issue(&self, repository_id: Uuid, id: Uuid) -> StoreResult<Option<ResourceRef>> {
            let inner = self.inner.read().await;
            let (repo, creator) = match inner.issues.get(&id) {
                Some(row) => *row,
                None => return Ok(None),
            };
            if repo != repository_id {
                return Ok(None);
            }
            // Join through the repository for the organization scope.
            let organization_id = match inner.repositories.get(&repo) {
                Some(organization_id) => *organization_id,
                None => return Ok(None),
            };
            Ok(Some(ResourceRef::issue(id, repo, organization_id, creator)))
        }

        async fn repositories_for_actor(
            &self,
            user_id: Uuid,
            filter: &RoleFilter,
        ) -> StoreResult<Vec<ResourceRef>> {
            if filter.is_empty() {
                return Ok(Vec::new());
            }

            let inner = self.inner.read().await;
            let mut reachable = Vec::new();
            for (repository_id, organization_id) in &inner.repositories {
                let qualifies = match inner.repository_roles.get(&(user_id, *repository_id)) {
                    Some(direct) => filter.repository_roles.contains(direct),
                    None => inner
                        .organization_roles
                        .get(&(user_id, *organization_id))
                        .map_or(false, |role| filter.organization_roles.contains(role)),
                };
                if qualifies {
                    reachable.push(ResourceRef::repository(*repository_id, *organization_id));
                }
            }
            Ok(reachable)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_membership_lookup() {
            let store = MemoryStore::new();
            let user = Uuid::now_v7();
            let org = Uuid::now_v7();

            assert_eq!(store.organization_role(user, org).await.unwrap(), None);

            store.grant_organization_role(user, org, Role::Member).await;
            assert_eq!(
                store.organization_role(user, org).await.unwrap(),
                Some(Role::Member)
            );

            // Re-granting replaces, never stacks.
            store.grant_organization_role(user, org, Role::Owner).await;
            assert_eq!(
                store.organization_role(user, org).await.unwrap(),
                Some(Role::Owner)
            );
        }

        #[tokio::test]
        async fn test_scoped_repository_lookup() {
            let store = MemoryStore::new();
            let org = Uuid::now_v7();
            let other_org = Uuid::now_v7();
            let repo = Uuid::now_v7();

            store.add_organization(org).await;
            store.add_organization(other_org).await;
            store.add_repository(repo, org).await;

            assert!(store.repository(org, repo).await.unwrap().is_some());
            // Same answer for "wrong parent" and "no such repository".
            assert!(store.repository(other_org, repo).await.unwrap().is_none());
            assert!(store
                .repository(org, Uuid::now_v7())
                .await
                .unwrap()
                .is_none());
        }

        #[tokio::test]
        async fn test_scoped_issue_lookup_joins_organization() {
            let store = MemoryStore::new();
            let org = Uuid::now_v7();
            let repo = Uuid::now_v7();
            let other_repo = Uuid::now_v7();
            let issue = Uuid::now_v7();
            let creator = Uuid::now_v7();

            store.add_organization(org).await;
            store.add_repository(repo, org).await;
            store.add_repository(other_repo, org).await;
            store.add_issue(issue, repo, creator).await;

            let found = store.issue(repo, issue).await.unwrap().unwrap();
            assert_eq!(
                found,
                ResourceRef::issue(issue, repo, org, creator)
            );

            assert!(store.issue(other_repo, issue).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_clones_share_data() {
            let store = MemoryStore::new();
            let clone = store.clone();
            let org = Uuid::now_v7();

            store.add_organization(org).await;
            assert!(clone.organization(org).await.unwrap().is_some());
        }
    }
}

#[cfg(feature = "memory")]
pub use memory::MemoryStore;
