// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::role::Role;
use crate::types::{ProjectId, UserId};

/// The association binding a user to a project with a role.
///
/// Invariants, enforced by the store atomically with every write:
/// - the (user, project) pair is unique
/// - at most one membership per project carries [`Role::Owner`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user: UserId,
    pub project: ProjectId,
    pub role: Role,
}

/// Payload for inserting a membership row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMembership {
    pub user: UserId,
    pub project: ProjectId,
    pub role: Role,
}
