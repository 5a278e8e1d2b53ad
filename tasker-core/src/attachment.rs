// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::types::{AttachmentId, TaskId, Timestamp, UserId};

/// A file attached to a task. The uploader is immutable and `file` is an opaque reference into
/// whatever blob storage the surrounding application uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub task: TaskId,
    pub uploaded_by: UserId,
    pub file: String,
    pub uploaded_at: Timestamp,
}

/// Payload for attaching a file. Id, uploader and timestamp are assigned at insert time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttachment {
    pub task: TaskId,
    pub file: String,
}
