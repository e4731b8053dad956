//! # Forge Authorization Engine
//!
//! Role-based authorization for the Forge platform's resource hierarchy:
//! accounts, organizations, the repositories they own, and the issues
//! filed against those repositories. Policy lives in static tables; who
//! holds which role lives in a store the application provides.
//!
//! ## Overview
//!
//! The forge-authz crate handles:
//! - **Policy tables**: Which actions each role grants on each resource
//!   kind, plus the reverse lookup from an action to the roles granting it
//! - **Role resolution**: The actor's effective role on a resource,
//!   including organization-to-repository and repository-to-issue
//!   inheritance and the issue creator override
//! - **Decisions**: `authorized` for a boolean answer, `check_authz` for
//!   an enforcing gate
//! - **Listings**: Role filters a store can push into its queries, and a
//!   per-row post-filter, guaranteed to agree with `authorized`
//! - **Gated access**: Scoped fetch helpers for nested resource paths
//!
//! ## Architecture
//!
//! ```text
//! AuthzEngine
//!   ├─ PolicyTables ──── role → actions, action → roles, inheritance
//!   ├─ MembershipStore ─ organization and repository role lookups
//!   └─ decisions ─────── authorized / check_authz / resolve_role
//!
//! access ──── organization / repository / issue fetches, gated on Read
//! listing ─── RoleFilter pushdown + filter_authorized post-filter
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use forge_authz::{Action, AuthzEngine, AuthzTarget, MemoryStore};
//! use forge_org::{Actor, ResourceRef, Role};
//! use uuid::Uuid;
//!
//! # async fn demo() -> Result<(), forge_authz::AuthzError> {
//! let store = MemoryStore::new();
//! let engine = AuthzEngine::new(store.clone());
//!
//! let org = Uuid::now_v7();
//! let repo = Uuid::now_v7();
//! let alice = Actor::new(Uuid::now_v7());
//!
//! store.add_organization(org).await;
//! store.add_repository(repo, org).await;
//! store.grant_organization_role(alice.id, org, Role::Member).await;
//!
//! // Organization members read repositories as inherited readers.
//! let target = AuthzTarget::from(ResourceRef::repository(repo, org));
//! assert!(engine.authorized(alice, Action::Read, target).await?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Cross-App Integration
//!
//! This crate is designed to work with:
//! - `forge-org`: Actors, roles, memberships, and resource references
//! - Application persistence layers, which implement [`MembershipStore`]
//!   and [`ResourceStore`] against their database
//!
//! ## Feature Flags
//!
//! - `memory`: In-memory store implementation (enabled by default)

pub mod access;
pub mod actions;
pub mod engine;
pub mod error;
pub mod listing;
pub mod policy;
pub mod store;

// Re-export main types for convenience
pub use actions::Action;
pub use engine::{AuthzEngine, AuthzTarget};
pub use error::{AuthzError, AuthzResult};
pub use listing::{filter_authorized, RoleFilter};
pub use policy::PolicyTables;
pub use store::{MembershipStore, ResourceStore, StoreError, StoreResult};

#[cfg(feature = "memory")]
pub use store::MemoryStore;
