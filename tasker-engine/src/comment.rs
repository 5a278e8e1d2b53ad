// SPDX-License-Identifier: MIT OR Apache-2.0

use tasker_auth::guard;
use tasker_core::{Comment, CommentId, NewComment, TaskId, UserId};
use tasker_store::Store;

use crate::engine::Engine;
use crate::error::{EngineError, Resource};

impl<S> Engine<S>
where
    S: Store,
{
    /// Comment on a task. Any project member may.
    pub fn add_comment(
        &mut self,
        caller: UserId,
        new: NewComment,
    ) -> Result<Comment, EngineError> {
        let Some(task) = self.store.task(new.task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::comment::create(resolution.role)?;

        Ok(self.store.insert_comment(new, caller)?)
    }

    pub fn comments(&self, caller: UserId, task: TaskId) -> Result<Vec<Comment>, EngineError> {
        let Some(task) = self.store.task(task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::task::view(resolution.role)?;

        Ok(self.store.comments_for_task(task.id)?)
    }

    /// Edit a comment's content. Author, admins and the owner only.
    pub fn update_comment(
        &mut self,
        caller: UserId,
        id: CommentId,
        content: String,
    ) -> Result<Comment, EngineError> {
        let Some(mut comment) = self.store.comment(id)? else {
            return Err(EngineError::NotFound(Resource::Comment));
        };
        let resolution = self.resolution_for(caller, &comment)?;
        guard::comment::update(caller, &comment, resolution.role)?;

        comment.content = content;
        if !self.store.update_comment(&comment)? {
            return Err(EngineError::NotFound(Resource::Comment));
        }
        Ok(comment)
    }

    /// Delete a comment. Author, admins and the owner only.
    pub fn delete_comment(&mut self, caller: UserId, id: CommentId) -> Result<(), EngineError> {
        let Some(comment) = self.store.comment(id)? else {
            return Err(EngineError::NotFound(Resource::Comment));
        };
        let resolution = self.resolution_for(caller, &comment)?;
        guard::comment::delete(caller, &comment, resolution.role)?;

        self.store.delete_comment(id)?;
        Ok(())
    }
}
