//! # Forge Tenancy and Resource Model
//!
//! This crate provides the tenancy model shared across the Forge platform:
//! the users, roles, membership records, and resource references that the
//! authorization engine in `forge-authz` reasons about.
//!
//! ## Overview
//!
//! The forge-org crate handles:
//! - **Actors**: Authenticated users as authorization subjects
//! - **Roles**: The platform-wide role vocabulary
//! - **Memberships**: User-organization and user-repository role grants
//! - **Resources**: Resource kinds and the references decisions are made
//!   against
//!
//! ## Architecture
//!
//! ```text
//! Actor (authenticated user)
//!   ├─ OrganizationMembership ─→ Organization
//!   │                               └─ Repository
//!   │                                     └─ Issue (tracks creator)
//!   └─ RepositoryMembership ───→ Repository
//! ```
//!
//! A repository reference carries its organization id, and an issue
//! reference carries its repository, organization, and creator ids, so
//! inherited access can be resolved without loading entity rows.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use forge_org::{Actor, OrganizationMembership, ResourceRef, Role};
//! use uuid::Uuid;
//!
//! // An authenticated user
//! let actor = Actor::new(Uuid::now_v7());
//!
//! // Grant the user a role in an organization
//! let org_id = Uuid::now_v7();
//! let membership = OrganizationMembership::new(org_id, actor.id, Role::Member);
//!
//! // Reference a repository in that organization for an authorization check
//! let repo = ResourceRef::repository(Uuid::now_v7(), org_id);
//! ```
//!
//! ## Cross-App Integration
//!
//! This crate is designed to work with:
//! - `forge-authz`: Policy tables and the authorization engine
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support (enabled by default)

pub mod actor;
pub mod membership;
pub mod resource;
pub mod roles;

// Re-export main types for convenience
pub use actor::Actor;
pub use membership::{OrganizationMembership, RepositoryMembership};
pub use resource::{Resource, ResourceKind, ResourceRef};
pub use roles::Role;
