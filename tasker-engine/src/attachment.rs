// SPDX-License-Identifier: MIT OR Apache-2.0

use tasker_auth::guard;
use tasker_core::{Attachment, AttachmentId, NewAttachment, TaskId, UserId};
use tasker_store::Store;
use tracing::debug;

use crate::engine::Engine;
use crate::error::{EngineError, Resource};

impl<S> Engine<S>
where
    S: Store,
{
    /// Attach a file to a task. Any project member may; the caller becomes the uploader.
    pub fn add_attachment(
        &mut self,
        caller: UserId,
        new: NewAttachment,
    ) -> Result<Attachment, EngineError> {
        let Some(task) = self.store.task(new.task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::attachment::create(resolution.role)?;

        Ok(self.store.insert_attachment(new, caller)?)
    }

    pub fn attachments(
        &self,
        caller: UserId,
        task: TaskId,
    ) -> Result<Vec<Attachment>, EngineError> {
        let Some(task) = self.store.task(task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::task::view(resolution.role)?;

        Ok(self.store.attachments_for_task(task.id)?)
    }

    /// Delete an attachment. Project owner or the uploader only; the role is resolved through
    /// the parent task's project.
    pub fn delete_attachment(
        &mut self,
        caller: UserId,
        id: AttachmentId,
    ) -> Result<(), EngineError> {
        let Some(attachment) = self.store.attachment(id)? else {
            return Err(EngineError::NotFound(Resource::Attachment));
        };
        let resolution = self.resolution_for(caller, &attachment)?;
        guard::attachment::delete(caller, &attachment, resolution.role)?;

        self.store.delete_attachment(id)?;
        debug!("attachment {} deleted by user {}", id, caller);
        Ok(())
    }
}
