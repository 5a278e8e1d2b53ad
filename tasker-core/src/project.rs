// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::types::{Date, ProjectId, Timestamp, UserId};

/// Lifecycle state of a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Active,
    Completed,
    Archived,
}

/// An owned collection of tasks.
///
/// `created_by` is immutable and the creator holds the single owner membership from the moment
/// the project exists. The member set is dynamic and lives in membership rows, never on the
/// project itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    pub status: ProjectStatus,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

/// Payload for creating a project. Id, creator and timestamp are assigned at insert time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub start_date: Date,
    pub end_date: Option<Date>,
    #[serde(default)]
    pub status: ProjectStatus,
}
