// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three roles a user can hold within a project. Greater roles are assumed to also contain
/// all lower ones.
///
/// Roles are scoped per (user, project) pair through a membership row. There is no global role:
/// the same user can own one project and be a plain member of another. Permission levels are
/// expressed as explicit predicate functions over a resolved role, not as a class hierarchy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular collaborator: can view the project and create tasks, subtasks, comments and
    /// attachments within it.
    Member,

    /// Elevated collaborator: everything a member can, plus editing and deleting resources
    /// created by others.
    Admin,

    /// The single project owner: full control, including membership changes.
    Owner,
}

impl Role {
    /// Role is Owner.
    pub fn is_owner(&self) -> bool {
        matches!(self, Role::Owner)
    }

    /// Role is Admin.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Role is Member.
    pub fn is_member(&self) -> bool {
        matches!(self, Role::Member)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Role::Member => "member",
            Role::Admin => "admin",
            Role::Owner => "owner",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "member" => Ok(Role::Member),
            "admin" => Ok(Role::Admin),
            "owner" => Ok(Role::Owner),
            other => Err(RoleError::UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum RoleError {
    #[error("unknown role name: {0}")]
    UnknownRole(String),
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::Role;

    #[test]
    fn role_ordering() {
        // Owner contains admin which contains member.
        assert!(Role::Owner > Role::Admin);
        assert!(Role::Admin > Role::Member);
        assert!(Role::Owner > Role::Member);
    }

    #[test]
    fn string_round_trip() {
        for role in [Role::Member, Role::Admin, Role::Owner] {
            assert_eq!(Role::from_str(&role.to_string()).unwrap(), role);
        }

        assert!(Role::from_str("superuser").is_err());
        // Role names are case-sensitive on the wire.
        assert!(Role::from_str("Owner").is_err());
    }

    #[test]
    fn serde_forms() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        let role: Role = serde_json::from_str("\"owner\"").unwrap();
        assert_eq!(role, Role::Owner);
    }
}
