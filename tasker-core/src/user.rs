// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::types::{Timestamp, UserId};

/// A registered user, identified by a unique email address.
///
/// Authentication is handled outside the core; everything here only compares identities.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub joined_at: Timestamp,
}

/// Payload for registering a user. Id and join timestamp are assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
}
