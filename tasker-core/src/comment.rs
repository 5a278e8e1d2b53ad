// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::types::{CommentId, TaskId, Timestamp, UserId};

/// A comment on a task. The author is immutable.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub task: TaskId,
    pub author: UserId,
    pub content: String,
    pub created_at: Timestamp,
}

/// Payload for adding a comment. Id, author and timestamp are assigned at insert time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub task: TaskId,
    pub content: String,
}
