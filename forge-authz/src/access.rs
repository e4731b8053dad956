//! Authorization-gated access
//!
//! Scoped fetch helpers for nested resource paths. Existence is checked
//! from the outside in, so a path under the wrong parent reads as
//! [`AuthzError::NotFound`] before any authorization runs; only an
//! existing, in-scope resource can produce [`AuthzError::Forbidden`].
//! That ordering is part of the contract: callers cannot probe for
//! resources they are not allowed to see.

use tracing::trace;
use uuid::Uuid;

use forge_org::{Actor, ResourceRef};

use crate::actions::Action;
use crate::engine::AuthzEngine;
use crate::error::{AuthzError, AuthzResult};
use crate::store::{MembershipStore, ResourceStore};

/// Fetch an organization, or `NotFound`.
pub async fn organization(store: &impl ResourceStore, id: Uuid) -> AuthzResult<ResourceRef> {
    match store.organization(id).await? {
        Some(org) => Ok(org),
        None => {
            trace!(organization = %id, "Organization not found");
            Err(AuthzError::NotFound)
        }
    }
}

/// Fetch a repository by its nested path and gate it on read access.
///
/// Checks that the organization exists and the repository exists under
/// it, then requires [`Action::Read`] on the repository. A repository
/// that lives under a different organization is `NotFound`, not
/// `Forbidden`.
pub async fn repository<S: MembershipStore>(
    store: &impl ResourceStore,
    engine: &AuthzEngine<S>,
    actor: Actor,
    organization_id: Uuid,
    repository_id: Uuid,
) -> AuthzResult<ResourceRef> {
    let repo = scoped_repository(store, organization_id, repository_id).await?;
    engine.check_authz(actor, Action::Read, repo.into()).await?;
    Ok(repo)
}

/// Fetch an issue by its nested path and gate it on read access.
///
/// The repository on the path is checked for existence in scope only;
/// read access is decided on the issue itself, where the creator
/// override applies.
pub async fn issue<S: MembershipStore>(
    store: &impl ResourceStore,
    engine: &AuthzEngine<S>,
    actor: Actor,
    organization_id: Uuid,
    repository_id: Uuid,
    issue_id: Uuid,
) -> AuthzResult<ResourceRef> {
    scoped_repository(store, organization_id, repository_id).await?;

    let issue = match store.issue(repository_id, issue_id).await? {
        Some(issue) => issue,
        None => {
            trace!(
                repository = %repository_id,
                issue = %issue_id,
                "Issue not found in repository"
            );
            return Err(AuthzError::NotFound);
        }
    };

    engine.check_authz(actor, Action::Read, issue.into()).await?;
    Ok(issue)
}

/// Existence of a repository under an organization, without any
/// authorization.
async fn scoped_repository(
    store: &impl ResourceStore,
    organization_id: Uuid,
    repository_id: Uuid,
) -> AuthzResult<ResourceRef> {
    organization(store, organization_id).await?;

    match store.repository(organization_id, repository_id).await? {
        Some(repo) => Ok(repo),
        None => {
            trace!(
                organization = %organization_id,
                repository = %repository_id,
                "Repository not found in organization"
            );
            Err(AuthzError::NotFound)
        }
    }
}
