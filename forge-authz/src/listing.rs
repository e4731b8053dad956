//! Authorized listing
//!
//! Two strategies for list endpoints: a role filter the store can push
//! down into its repository query, and a post-filter that runs the
//! engine over rows already in hand. Both must agree with
//! [`AuthzEngine::authorized`](crate::engine::AuthzEngine::authorized)
//! row for row.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use forge_org::{Actor, Resource, Role};

use crate::actions::Action;
use crate::engine::AuthzEngine;
use crate::error::AuthzResult;
use crate::store::MembershipStore;

/// Roles that reach a given repository action, split by grant scope.
///
/// Built by [`PolicyTables::repository_role_filter`] and consumed by
/// [`ResourceStore::repositories_for_actor`]. `organization_roles` is the
/// preimage of `repository_roles` under organization-to-repository role
/// inheritance, so the pushed-down query and a per-row authorization
/// check select the same rows.
///
/// [`PolicyTables::repository_role_filter`]: crate::policy::PolicyTables::repository_role_filter
/// [`ResourceStore::repositories_for_actor`]: crate::store::ResourceStore::repositories_for_actor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFilter {
    /// Direct repository roles that grant the action
    pub repository_roles: BTreeSet<Role>,

    /// Organization roles whose implied repository role grants the action
    pub organization_roles: BTreeSet<Role>,
}

impl RoleFilter {
    /// True when no role grants the action, directly or by inheritance.
    pub fn is_empty(&self) -> bool {
        self.repository_roles.is_empty() && self.organization_roles.is_empty()
    }
}

/// Keep the items the actor may perform `action` on.
///
/// Preserves input order. Used when rows are already loaded, or for kinds
/// where no pushdown filter exists.
pub async fn filter_authorized<S, R>(
    engine: &AuthzEngine<S>,
    actor: Actor,
    action: Action,
    items: Vec<R>,
) -> AuthzResult<Vec<R>>
where
    S: MembershipStore,
    R: Resource,
{
    let mut kept = Vec::with_capacity(items.len());
    for item in items {
        if engine
            .authorized(actor, action, item.resource_ref().into())
            .await?
        {
            kept.push(item);
        }
    }
    Ok(kept)
}
