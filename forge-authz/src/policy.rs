//! # Policy tables
//!
//! The immutable mapping from (resource kind, role) to permitted actions,
//! with role inheritance applied up front. One [`PolicyTables`] value is
//! built at startup and shared for the process lifetime; every lookup
//! afterwards is plain set containment with no locking.

use std::collections::{BTreeMap, BTreeSet};

use forge_org::{ResourceKind, Role};

use crate::actions::Action;
use crate::error::AuthzError;
use crate::listing::RoleFilter;

/// Per-kind role-to-action tables plus the derived reverse lookup.
///
/// Within a kind, roles form a chain and each role's action set is the
/// union of everything below it, computed once at construction. Across
/// kinds nothing is stored: organization roles imply repository roles and
/// repository roles imply issue roles through the alias methods, so the
/// tables stay the single source of truth for what a role grants.
///
/// The reverse map from (action, kind) to granting roles is populated
/// eagerly over the full cross product. Lookups on it cannot fail, a pair
/// no role grants simply yields the empty set, and nothing is ever added
/// after construction.
///
/// # Examples
///
/// ```
/// use forge_authz::{Action, PolicyTables};
/// use forge_org::{ResourceKind, Role};
///
/// let tables = PolicyTables::builtin();
/// let actions = tables.get_actions(ResourceKind::Repository, Role::Reader).unwrap();
/// assert!(actions.contains(&Action::Read));
/// assert!(!actions.contains(&Action::CreateRoleAssignments));
/// ```
#[derive(Debug, Clone)]
pub struct PolicyTables {
    /// kind -> role -> permitted actions, inheritance already applied
    actions: BTreeMap<ResourceKind, BTreeMap<Role, BTreeSet<Action>>>,

    /// kind -> declared roles
    roles: BTreeMap<ResourceKind, BTreeSet<Role>>,

    /// (action, kind) -> roles granting the action, total over the cross
    /// product of declared actions and kinds
    grantors: BTreeMap<(Action, ResourceKind), BTreeSet<Role>>,
}

impl PolicyTables {
    /// Build the platform's policy tables.
    ///
    /// # Returns
    ///
    /// The complete tables for all four resource kinds.
    pub fn builtin() -> Self {
        let mut actions: BTreeMap<ResourceKind, BTreeMap<Role, BTreeSet<Action>>> = BTreeMap::new();

        actions.insert(
            ResourceKind::Account,
            Self::chain(&[
                (Role::Reader, &[Action::ReadProfile]),
                (Role::Owner, &[Action::UpdateProfile, Action::DeleteProfile]),
            ]),
        );

        actions.insert(
            ResourceKind::Organization,
            Self::chain(&[
                (
                    Role::Member,
                    &[Action::Read, Action::ListRepos, Action::ListRoleAssignments],
                ),
                (
                    Role::Owner,
                    &[
                        Action::CreateRepos,
                        Action::CreateRoleAssignments,
                        Action::UpdateRoleAssignments,
                        Action::DeleteRoleAssignments,
                    ],
                ),
            ]),
        );

        actions.insert(
            ResourceKind::Repository,
            Self::chain(&[
                (
                    Role::Reader,
                    &[Action::Read, Action::ListIssues, Action::CreateIssues],
                ),
                // Reserved tier: grants nothing beyond reader at repository
                // scope, but maps to issue maintainer through the alias.
                (Role::Maintainer, &[]),
                (
                    Role::Admin,
                    &[
                        Action::ListRoleAssignments,
                        Action::CreateRoleAssignments,
                        Action::UpdateRoleAssignments,
                        Action::DeleteRoleAssignments,
                    ],
                ),
            ]),
        );

        actions.insert(
            ResourceKind::Issue,
            Self::chain(&[
                (Role::Reader, &[Action::Read]),
                (Role::Maintainer, &[Action::Update, Action::Close]),
                (Role::Creator, &[Action::Reopen]),
            ]),
        );

        let roles = actions
            .iter()
            .map(|(kind, table)| (*kind, table.keys().copied().collect()))
            .collect();

        let mut grantors: BTreeMap<(Action, ResourceKind), BTreeSet<Role>> = BTreeMap::new();
        for (kind, table) in &actions {
            for action in Action::all() {
                let granting = table
                    .iter()
                    .filter(|(_, granted)| granted.contains(&action))
                    .map(|(role, _)| *role)
                    .collect();
                grantors.insert((action, *kind), granting);
            }
        }

        Self {
            actions,
            roles,
            grantors,
        }
    }

    /// Build one kind's table from a weakest-to-strongest role chain.
    ///
    /// Each role receives the union of every preceding role's actions plus
    /// its own additions.
    fn chain(levels: &[(Role, &[Action])]) -> BTreeMap<Role, BTreeSet<Action>> {
        let mut table = BTreeMap::new();
        let mut granted: BTreeSet<Action> = BTreeSet::new();
        for (role, additions) in levels {
            granted.extend(additions.iter().copied());
            table.insert(*role, granted.clone());
        }
        table
    }

    /// The actions a role grants on a kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The resource kind
    /// * `role` - The role to look up
    ///
    /// # Returns
    ///
    /// The permitted action set, or `UnknownRole` if the role is not
    /// declared for the kind. An undeclared (kind, role) pair is a
    /// configuration bug in whatever stored or resolved the role, so it
    /// surfaces as a server fault rather than an empty grant.
    pub fn get_actions(
        &self,
        kind: ResourceKind,
        role: Role,
    ) -> Result<&BTreeSet<Action>, AuthzError> {
        self.actions
            .get(&kind)
            .and_then(|table| table.get(&role))
            .ok_or(AuthzError::UnknownRole { kind, role })
    }

    /// The full declared role set for a kind.
    pub fn resource_roles(&self, kind: ResourceKind) -> &BTreeSet<Role> {
        static EMPTY: BTreeSet<Role> = BTreeSet::new();
        self.roles.get(&kind).unwrap_or(&EMPTY)
    }

    /// Validate a role name from an incoming payload against a kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The resource kind the payload targets
    /// * `role` - The raw role string from the payload
    ///
    /// # Returns
    ///
    /// The parsed role, or `InvalidRole` (client-facing, unlike
    /// `UnknownRole`) when the string does not parse or names a role the
    /// kind does not declare.
    ///
    /// # Examples
    ///
    /// ```
    /// use forge_authz::PolicyTables;
    /// use forge_org::{ResourceKind, Role};
    ///
    /// let tables = PolicyTables::builtin();
    /// let role = tables.check_resource_role(ResourceKind::Repository, "admin").unwrap();
    /// assert_eq!(role, Role::Admin);
    /// assert!(tables.check_resource_role(ResourceKind::Organization, "admin").is_err());
    /// ```
    pub fn check_resource_role(&self, kind: ResourceKind, role: &str) -> Result<Role, AuthzError> {
        Role::parse(role)
            .filter(|parsed| self.resource_roles(kind).contains(parsed))
            .ok_or_else(|| AuthzError::InvalidRole {
                kind,
                role: role.to_string(),
            })
    }

    /// The roles that grant an action on a kind.
    ///
    /// Served from the precomputed reverse map; the set is empty when no
    /// declared role grants the action on that kind, which is a normal
    /// answer rather than an error.
    pub fn action_to_roles(&self, action: Action, kind: ResourceKind) -> &BTreeSet<Role> {
        static EMPTY: BTreeSet<Role> = BTreeSet::new();
        self.grantors.get(&(action, kind)).unwrap_or(&EMPTY)
    }

    /// The repository role an organization role implies.
    ///
    /// # Arguments
    ///
    /// * `organization_role` - A role declared at organization scope
    ///
    /// # Returns
    ///
    /// Members read, owners administer; any role not declared at
    /// organization scope is `UnknownRole`.
    pub fn inherited_repository_role(&self, organization_role: Role) -> Result<Role, AuthzError> {
        match organization_role {
            Role::Member => Ok(Role::Reader),
            Role::Owner => Ok(Role::Admin),
            role => Err(AuthzError::UnknownRole {
                kind: ResourceKind::Organization,
                role,
            }),
        }
    }

    /// The issue role an effective repository role implies.
    ///
    /// # Arguments
    ///
    /// * `repository_role` - A role declared at repository scope
    ///
    /// # Returns
    ///
    /// Readers read; maintainers and admins maintain. Nothing maps to
    /// issue creator: only the actual creator of an issue reopens it.
    pub fn inherited_issue_role(&self, repository_role: Role) -> Result<Role, AuthzError> {
        match repository_role {
            Role::Reader => Ok(Role::Reader),
            Role::Maintainer | Role::Admin => Ok(Role::Maintainer),
            role => Err(AuthzError::UnknownRole {
                kind: ResourceKind::Repository,
                role,
            }),
        }
    }

    /// The role filter a repository listing query needs for an action.
    ///
    /// `repository_roles` are the direct roles granting the action;
    /// `organization_roles` is exactly the preimage of that set under the
    /// organization-to-repository alias. A store honoring the precedence
    /// contract on `repositories_for_actor` therefore returns exactly the
    /// repositories a per-row `authorized` check would keep.
    pub fn repository_role_filter(&self, action: Action) -> RoleFilter {
        let repository_roles = self
            .action_to_roles(action, ResourceKind::Repository)
            .clone();
        let organization_roles = self
            .resource_roles(ResourceKind::Organization)
            .iter()
            .copied()
            .filter(|role| {
                self.inherited_repository_role(*role)
                    .map_or(false, |implied| repository_roles.contains(&implied))
            })
            .collect();

        RoleFilter {
            repository_roles,
            organization_roles,
        }
    }
}

impl Default for PolicyTables {
    fn default() -> Self {
        Self::builtin()
    }
}
