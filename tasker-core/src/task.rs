// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::types::{Date, ProjectId, TaskId, Timestamp, UserId};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Progress state shared by tasks and subtasks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

/// A unit of work within exactly one project.
///
/// `created_by` is immutable; status and priority are mutable under the task guard. Assignees
/// are tracked in separate assignment rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub project: ProjectId,
    pub title: String,
    pub description: String,
    pub due_date: Option<Date>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub created_by: UserId,
    pub created_at: Timestamp,
}

/// Payload for creating a task. Id, creator and timestamp are assigned at insert time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTask {
    pub project: ProjectId,
    pub title: String,
    pub description: String,
    pub due_date: Option<Date>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Assignment of a user to a task, unique per (task, user) pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignment {
    pub task: TaskId,
    pub user: UserId,
    pub assigned_at: Timestamp,
}
