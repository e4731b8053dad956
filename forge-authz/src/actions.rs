//! # Actions
//!
//! Defines all actions that can be performed on platform resources.
//! Each action belongs to one resource kind's policy table; the tables in
//! [`crate::policy`] decide which roles grant it.

use serde::{Deserialize, Serialize};

/// Actions that can be performed on platform resources.
///
/// Action names match the policy tables and the HTTP layer's payloads:
/// profile actions apply to accounts, repository and role-assignment
/// management to organizations and repositories, and the lifecycle
/// actions to issues. `create` stands alone as the kind-level request
/// used for organization creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read an account's public profile
    ReadProfile,

    /// Update an account's profile
    UpdateProfile,

    /// Delete an account
    DeleteProfile,

    /// Read a resource (organizations, repositories, issues)
    Read,

    /// List an organization's repositories
    ListRepos,

    /// Create repositories in an organization
    CreateRepos,

    /// List role assignments on an organization or repository
    ListRoleAssignments,

    /// Create role assignments on an organization or repository
    CreateRoleAssignments,

    /// Change role assignments on an organization or repository
    UpdateRoleAssignments,

    /// Remove role assignments from an organization or repository
    DeleteRoleAssignments,

    /// List a repository's issues
    ListIssues,

    /// Open issues in a repository
    CreateIssues,

    /// Edit an issue
    Update,

    /// Close an issue
    Close,

    /// Reopen a closed issue
    Reopen,

    /// Create a resource of some kind; used for organization creation
    Create,
}

impl Action {
    /// Get the string representation of the action.
    ///
    /// # Returns
    ///
    /// A static string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ReadProfile => "read_profile",
            Action::UpdateProfile => "update_profile",
            Action::DeleteProfile => "delete_profile",
            Action::Read => "read",
            Action::ListRepos => "list_repos",
            Action::CreateRepos => "create_repos",
            Action::ListRoleAssignments => "list_role_assignments",
            Action::CreateRoleAssignments => "create_role_assignments",
            Action::UpdateRoleAssignments => "update_role_assignments",
            Action::DeleteRoleAssignments => "delete_role_assignments",
            Action::ListIssues => "list_issues",
            Action::CreateIssues => "create_issues",
            Action::Update => "update",
            Action::Close => "close",
            Action::Reopen => "reopen",
            Action::Create => "create",
        }
    }

    /// Parse an action from its string representation.
    ///
    /// # Arguments
    ///
    /// * `s` - String to parse (case-insensitive)
    ///
    /// # Returns
    ///
    /// `Some(Action)` if valid, `None` otherwise
    ///
    /// # Example
    ///
    /// ```
    /// use forge_authz::Action;
    ///
    /// assert_eq!(Action::parse("read"), Some(Action::Read));
    /// assert_eq!(Action::parse("list_repos"), Some(Action::ListRepos));
    /// assert_eq!(Action::parse("invalid"), None);
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "read_profile" => Some(Action::ReadProfile),
            "update_profile" => Some(Action::UpdateProfile),
            "delete_profile" => Some(Action::DeleteProfile),
            "read" => Some(Action::Read),
            "list_repos" => Some(Action::ListRepos),
            "create_repos" => Some(Action::CreateRepos),
            "list_role_assignments" => Some(Action::ListRoleAssignments),
            "create_role_assignments" => Some(Action::CreateRoleAssignments),
            "update_role_assignments" => Some(Action::UpdateRoleAssignments),
            "delete_role_assignments" => Some(Action::DeleteRoleAssignments),
            "list_issues" => Some(Action::ListIssues),
            "create_issues" => Some(Action::CreateIssues),
            "update" => Some(Action::Update),
            "close" => Some(Action::Close),
            "reopen" => Some(Action::Reopen),
            "create" => Some(Action::Create),
            _ => None,
        }
    }

    /// Get all actions.
    ///
    /// # Returns
    ///
    /// A vector containing all declared actions.
    pub fn all() -> Vec<Self> {
        vec![
            Action::ReadProfile,
            Action::UpdateProfile,
            Action::DeleteProfile,
            Action::Read,
            Action::ListRepos,
            Action::CreateRepos,
            Action::ListRoleAssignments,
            Action::CreateRoleAssignments,
            Action::UpdateRoleAssignments,
            Action::DeleteRoleAssignments,
            Action::ListIssues,
            Action::CreateIssues,
            Action::Update,
            Action::Close,
            Action::Reopen,
            Action::Create,
        ]
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parsing() {
        assert_eq!(Action::parse("read"), Some(Action::Read));
        assert_eq!(Action::parse("read_profile"), Some(Action::ReadProfile));
        assert_eq!(
            Action::parse("create_role_assignments"),
            Some(Action::CreateRoleAssignments)
        );
        assert_eq!(Action::parse("REOPEN"), Some(Action::Reopen));
        assert_eq!(Action::parse("invalid"), None);
        assert_eq!(Action::parse(""), None);
    }

    #[test]
    fn test_action_as_str() {
        assert_eq!(Action::Read.as_str(), "read");
        assert_eq!(Action::ListRepos.as_str(), "list_repos");
        assert_eq!(Action::UpdateProfile.as_str(), "update_profile");
        assert_eq!(
            Action::DeleteRoleAssignments.as_str(),
            "delete_role_assignments"
        );
        assert_eq!(Action::Create.as_str(), "create");
    }

    #[test]
    fn test_action_round_trip() {
        for action in Action::all() {
            assert_eq!(Action::parse(action.as_str()), Some(action));
        }
    }

    #[test]
    fn test_all_actions_count() {
        let all = Action::all();
        assert_eq!(all.len(), 16);
    }
}
