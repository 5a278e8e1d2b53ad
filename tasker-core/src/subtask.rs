// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::task::TaskStatus;
use crate::types::{SubtaskId, TaskId, Timestamp};

/// A step within a task. Subtasks carry no author of their own; their authorization context is
/// inherited from the parent task's project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: SubtaskId,
    pub task: TaskId,
    pub title: String,
    pub status: TaskStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Payload for creating a subtask.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubtask {
    pub task: TaskId,
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
}
