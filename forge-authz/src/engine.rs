//! Authorization engine
//!
//! The engine answers one question: may this actor perform this action on
//! this target? It resolves the actor's effective role from stored
//! memberships and resource relationships, then consults the policy
//! tables. It never writes; membership management stays with the caller.

use std::sync::Arc;

use tracing::{debug, trace};
use uuid::Uuid;

use forge_org::{Actor, ResourceKind, ResourceRef, Role};

use crate::actions::Action;
use crate::error::{AuthzError, AuthzResult};
use crate::policy::PolicyTables;
use crate::store::MembershipStore;

/// What an authorization request is aimed at.
///
/// Most requests target a concrete resource instance. Kind-level targets
/// exist for actions that happen before any instance does; the only
/// declared one is creating an organization, which every authenticated
/// user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthzTarget {
    /// A concrete resource
    Instance(ResourceRef),

    /// A resource kind, for pre-instance actions
    Kind(ResourceKind),
}

impl From<ResourceRef> for AuthzTarget {
    fn from(resource: ResourceRef) -> Self {
        Self::Instance(resource)
    }
}

impl From<ResourceKind> for AuthzTarget {
    fn from(kind: ResourceKind) -> Self {
        Self::Kind(kind)
    }
}

/// The authorization engine.
///
/// Holds the built-in policy tables and a [`MembershipStore`] for role
/// lookups. Role resolution per kind:
///
/// - **Account**: every user owns their own account and reads everyone
///   else's, with no store involved.
/// - **Organization**: the stored membership role, if any.
/// - **Repository**: a direct repository grant, or failing that the role
///   implied by the organization membership (member acts as reader,
///   owner as admin).
/// - **Issue**: the issue's creator acts as creator regardless of any
///   membership; everyone else gets the role implied by their effective
///   repository role (reader stays reader, maintainer and admin act as
///   maintainer).
///
/// Exactly one rule applies per request. A direct grant is never
/// combined with an inherited one, and a weaker direct grant shadows a
/// stronger inherited one.
///
/// # Examples
///
/// ```
/// use forge_authz::{Action, AuthzEngine, AuthzTarget, MemoryStore};
/// use forge_org::{Actor, ResourceKind};
///
/// # async fn demo() -> Result<(), forge_authz::AuthzError> {
/// let engine = AuthzEngine::new(MemoryStore::new());
/// let actor = Actor::new(uuid::Uuid::now_v7());
///
/// // Any authenticated user may create an organization.
/// let allowed = engine
///     .authorized(actor, Action::Create, AuthzTarget::Kind(ResourceKind::Organization))
///     .await?;
/// assert!(allowed);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AuthzEngine<S> {
    tables: Arc<PolicyTables>,
    store: S,
}

impl<S> std::fmt::Debug for AuthzEngine<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthzEngine").finish()
    }
}

impl<S> AuthzEngine<S> {
    /// Create an engine over the built-in policy tables.
    pub fn new(store: S) -> Self {
        Self {
            tables: Arc::new(PolicyTables::builtin()),
            store,
        }
    }

    /// The policy tables this engine consults.
    pub fn tables(&self) -> &PolicyTables {
        &self.tables
    }
}

impl<S: MembershipStore> AuthzEngine<S> {
    /// Resolve the actor's effective role on a resource.
    ///
    /// `None` means the actor stands in no relation to the resource at
    /// all. A resolved role still grants only what the policy tables say
    /// it grants.
    ///
    /// # Arguments
    ///
    /// * `actor` - The requesting user
    /// * `resource` - The resource being examined
    ///
    /// # Returns
    ///
    /// The effective role, or `None` when no rule matches
    pub async fn resolve_role(
        &self,
        actor: Actor,
        resource: ResourceRef,
    ) -> AuthzResult<Option<Role>> {
        let role = match resource {
            ResourceRef::Account { id } => {
                // Profiles are universally readable: every user is at
                // least a reader of every account, and owner of their own.
                if actor.id == id {
                    Some(Role::Owner)
                } else {
                    Some(Role::Reader)
                }
            }
            ResourceRef::Organization { id } => self.store.organization_role(actor.id, id).await?,
            ResourceRef::Repository {
                id,
                organization_id,
            } => {
                self.effective_repository_role(actor, id, organization_id)
                    .await?
            }
            ResourceRef::Issue {
                repository_id,
                organization_id,
                creator_id,
                ..
            } => {
                if actor.id == creator_id {
                    Some(Role::Creator)
                } else {
                    match self
                        .effective_repository_role(actor, repository_id, organization_id)
                        .await?
                    {
                        Some(repo_role) => Some(self.tables.inherited_issue_role(repo_role)?),
                        None => None,
                    }
                }
            }
        };

        trace!(
            actor = %actor.id,
            kind = %resource.kind(),
            resource = %resource.id(),
            role = ?role,
            "Resolved effective role"
        );

        Ok(role)
    }

    /// Decide whether the actor may perform an action on a target.
    ///
    /// Instance targets resolve the actor's effective role and look the
    /// action up in that role's permission set. The kind-level target
    /// `(Create, Organization)` is allowed for every authenticated user;
    /// any other kind-level combination has no policy and fails with
    /// [`AuthzError::Unsupported`].
    ///
    /// # Arguments
    ///
    /// * `actor` - The requesting user
    /// * `action` - The action being attempted
    /// * `target` - The resource instance or kind
    ///
    /// # Returns
    ///
    /// `Ok(true)` or `Ok(false)` for a decision; an error only when the
    /// request itself is malformed or a collaborator failed
    pub async fn authorized(
        &self,
        actor: Actor,
        action: Action,
        target: AuthzTarget,
    ) -> AuthzResult<bool> {
        match target {
            AuthzTarget::Kind(kind) => match (action, kind) {
                (Action::Create, ResourceKind::Organization) => {
                    debug!(
                        actor = %actor.id,
                        "Organization creation allowed for any authenticated user"
                    );
                    Ok(true)
                }
                _ => Err(AuthzError::Unsupported { action, kind }),
            },
            AuthzTarget::Instance(resource) => {
                let role = self.resolve_role(actor, resource).await?;
                let allowed = match role {
                    Some(role) => self
                        .tables
                        .get_actions(resource.kind(), role)?
                        .contains(&action),
                    None => false,
                };

                debug!(
                    actor = %actor.id,
                    action = %action,
                    kind = %resource.kind(),
                    resource = %resource.id(),
                    allowed,
                    "Authorization decision"
                );

                Ok(allowed)
            }
        }
    }

    /// Like [`authorized`](Self::authorized), but a denial becomes
    /// [`AuthzError::Forbidden`]. The gate handlers call before touching
    /// a resource.
    pub async fn check_authz(
        &self,
        actor: Actor,
        action: Action,
        target: AuthzTarget,
    ) -> AuthzResult<()> {
        if self.authorized(actor, action, target).await? {
            Ok(())
        } else {
            Err(AuthzError::Forbidden)
        }
    }

    /// The actor's effective role on a repository: the direct grant if
    /// one exists, otherwise the role implied by organization membership.
    ///
    /// A direct grant wins even when the organization role would imply a
    /// stronger one.
    async fn effective_repository_role(
        &self,
        actor: Actor,
        repository_id: Uuid,
        organization_id: Uuid,
    ) -> AuthzResult<Option<Role>> {
        if let Some(direct) = self.store.repository_role(actor.id, repository_id).await? {
            return Ok(Some(direct));
        }

        match self
            .store
            .organization_role(actor.id, organization_id)
            .await?
        {
            Some(org_role) => Ok(Some(self.tables.inherited_repository_role(org_role)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use crate::store::{MemoryStore, StoreError, StoreResult};

    use super::*;

    fn actor() -> Actor {
        Actor::new(Uuid::now_v7())
    }

    #[tokio::test]
    async fn test_account_rules_need_no_store() {
        let engine = AuthzEngine::new(MemoryStore::new());
        let me = actor();
        let someone_else = actor();

        let mine = ResourceRef::account(me.id);
        let theirs = ResourceRef::account(someone_else.id);

        assert_eq!(
            engine.resolve_role(me, mine).await.unwrap(),
            Some(Role::Owner)
        );
        assert_eq!(
            engine.resolve_role(me, theirs).await.unwrap(),
            Some(Role::Reader)
        );

        assert!(engine
            .authorized(me, Action::UpdateProfile, mine.into())
            .await
            .unwrap());
        assert!(engine
            .authorized(me, Action::ReadProfile, theirs.into())
            .await
            .unwrap());
        assert!(!engine
            .authorized(me, Action::UpdateProfile, theirs.into())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_organization_creation_is_kind_level() {
        let engine = AuthzEngine::new(MemoryStore::new());

        // No membership anywhere, creation is still allowed.
        assert!(engine
            .authorized(
                actor(),
                Action::Create,
                AuthzTarget::Kind(ResourceKind::Organization)
            )
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_undeclared_kind_level_requests_are_unsupported() {
        let engine = AuthzEngine::new(MemoryStore::new());

        let err = engine
            .authorized(
                actor(),
                Action::ListRepos,
                AuthzTarget::Kind(ResourceKind::Organization),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::Unsupported { .. }));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.error_code(), "NOT_IMPLEMENTED");

        let err = engine
            .authorized(
                actor(),
                Action::Create,
                AuthzTarget::Kind(ResourceKind::Repository),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::Unsupported { .. }));
    }

    #[tokio::test]
    async fn test_direct_repository_grant_shadows_organization_role() {
        let store = MemoryStore::new();
        let engine = AuthzEngine::new(store.clone());
        let owner = actor();
        let org = Uuid::now_v7();
        let repo = Uuid::now_v7();

        store.add_organization(org).await;
        store.add_repository(repo, org).await;
        store.grant_organization_role(owner.id, org, Role::Owner).await;
        store.grant_repository_role(owner.id, repo, Role::Reader).await;

        let repo_ref = ResourceRef::repository(repo, org);
        assert_eq!(
            engine.resolve_role(owner, repo_ref).await.unwrap(),
            Some(Role::Reader)
        );
    }

    #[tokio::test]
    async fn test_check_authz_maps_deny_to_forbidden() {
        let engine = AuthzEngine::new(MemoryStore::new());
        let outsider = actor();
        let org_ref = ResourceRef::organization(Uuid::now_v7());

        let err = engine
            .check_authz(outsider, Action::Read, org_ref.into())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden));
        assert_eq!(err.status_code(), 403);
    }

    struct FailingStore;

    #[async_trait]
    impl MembershipStore for FailingStore {
        async fn organization_role(&self, _: Uuid, _: Uuid) -> StoreResult<Option<Role>> {
            Err(StoreError::Connection("backend offline".to_string()))
        }

        async fn repository_role(&self, _: Uuid, _: Uuid) -> StoreResult<Option<Role>> {
            Err(StoreError::Connection("backend offline".to_string()))
        }
    }

    #[tokio::test]
    async fn test_store_failures_surface_as_errors_not_denials() {
        let engine = AuthzEngine::new(FailingStore);
        let org_ref = ResourceRef::organization(Uuid::now_v7());

        let err = engine
            .authorized(actor(), Action::Read, org_ref.into())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::Store(_)));
        assert!(err.is_server_error());
        assert_eq!(err.status_code(), 500);

        // The gate propagates the failure too, without turning it into a
        // denial.
        let err = engine
            .check_authz(actor(), Action::Read, org_ref.into())
            .await
            .unwrap_err();
        assert!(matches!(err, AuthzError::Store(_)));
    }
}
