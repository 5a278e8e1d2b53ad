// SPDX-License-Identifier: MIT OR Apache-2.0

use tasker_auth::{guard, resolve};
use tasker_core::{NewSubtask, Subtask, SubtaskId, TaskId, TaskStatus, UserId};
use tasker_store::Store;

use crate::engine::Engine;
use crate::error::{EngineError, Resource};

/// Partial update of a subtask; `None` fields stay unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubtaskPatch {
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
}

impl<S> Engine<S>
where
    S: Store,
{
    /// Add a subtask to a task. Any project member may.
    pub fn add_subtask(
        &mut self,
        caller: UserId,
        new: NewSubtask,
    ) -> Result<Subtask, EngineError> {
        let Some(task) = self.store.task(new.task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::subtask::create(resolution.role)?;

        Ok(self.store.insert_subtask(new)?)
    }

    pub fn subtasks(&self, caller: UserId, task: TaskId) -> Result<Vec<Subtask>, EngineError> {
        let Some(task) = self.store.task(task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::task::view(resolution.role)?;

        Ok(self.store.subtasks_for_task(task.id)?)
    }

    /// Update a subtask. Project owner or the parent task's creator only.
    pub fn update_subtask(
        &mut self,
        caller: UserId,
        id: SubtaskId,
        patch: SubtaskPatch,
    ) -> Result<Subtask, EngineError> {
        let Some(mut subtask) = self.store.subtask(id)? else {
            return Err(EngineError::NotFound(Resource::Subtask));
        };
        // The parent task is both the anchor to the project and part of the rule itself.
        let Some(parent) = self.store.task(subtask.task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let role = resolve(&self.store, caller, parent.project)?;
        guard::subtask::modify(caller, &parent, role)?;

        if let Some(title) = patch.title {
            subtask.title = title;
        }
        if let Some(status) = patch.status {
            subtask.status = status;
        }

        if !self.store.update_subtask(&subtask)? {
            return Err(EngineError::NotFound(Resource::Subtask));
        }
        // Re-read for the store-stamped updated_at.
        self.store
            .subtask(id)?
            .ok_or(EngineError::NotFound(Resource::Subtask))
    }

    /// Delete a subtask. Project owner or the parent task's creator only.
    pub fn delete_subtask(&mut self, caller: UserId, id: SubtaskId) -> Result<(), EngineError> {
        let Some(subtask) = self.store.subtask(id)? else {
            return Err(EngineError::NotFound(Resource::Subtask));
        };
        let Some(parent) = self.store.task(subtask.task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let role = resolve(&self.store, caller, parent.project)?;
        guard::subtask::modify(caller, &parent, role)?;

        self.store.delete_subtask(id)?;
        Ok(())
    }
}
