// SPDX-License-Identifier: MIT OR Apache-2.0

use tasker_auth::guard;
use tasker_core::{Date, NewTask, ProjectId, Task, TaskId, TaskPriority, TaskStatus, UserId};
use tasker_store::Store;

use crate::engine::Engine;
use crate::error::{EngineError, Resource};

/// Partial update of a task; `None` fields stay unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Date>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
}

impl<S> Engine<S>
where
    S: Store,
{
    /// Create a task in a project. Any member may; assignees must themselves be members of
    /// the project.
    pub fn create_task(
        &mut self,
        caller: UserId,
        new: NewTask,
        assignees: &[UserId],
    ) -> Result<Task, EngineError> {
        let Some(project) = self.store.project(new.project)? else {
            return Err(EngineError::NotFound(Resource::Project));
        };
        let resolution = self.resolution_for(caller, &project)?;
        guard::task::create(resolution.role)?;

        for user in assignees {
            self.ensure_assignable(*user, project.id)?;
        }

        let task = self.store.insert_task(new, caller)?;
        for user in assignees {
            self.store.insert_assignment(task.id, *user)?;
        }
        Ok(task)
    }

    pub fn task(&self, caller: UserId, id: TaskId) -> Result<Task, EngineError> {
        let Some(task) = self.store.task(id)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::task::view(resolution.role)?;
        Ok(task)
    }

    pub fn tasks(&self, caller: UserId, project: ProjectId) -> Result<Vec<Task>, EngineError> {
        let Some(project) = self.store.project(project)? else {
            return Err(EngineError::NotFound(Resource::Project));
        };
        let resolution = self.resolution_for(caller, &project)?;
        guard::task::view(resolution.role)?;

        Ok(self.store.tasks_for_project(project.id)?)
    }

    /// Update task fields. Task creator, admins and the owner only.
    pub fn update_task(
        &mut self,
        caller: UserId,
        id: TaskId,
        patch: TaskPatch,
    ) -> Result<Task, EngineError> {
        let Some(mut task) = self.store.task(id)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::task::update(caller, &task, resolution.role)?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }

        if !self.store.update_task(&task)? {
            return Err(EngineError::NotFound(Resource::Task));
        }
        Ok(task)
    }

    /// Delete a task and everything nested below it. Admins and the owner only.
    pub fn delete_task(&mut self, caller: UserId, id: TaskId) -> Result<(), EngineError> {
        let Some(task) = self.store.task(id)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::task::delete(resolution.role)?;

        self.store.delete_task(id)?;
        Ok(())
    }

    /// Assign a member to a task. Follows the task-update rule; assigning someone who is
    /// already assigned is an idempotent no-op.
    ///
    /// Returns `true` when a new assignment row was created.
    pub fn assign(
        &mut self,
        caller: UserId,
        task: TaskId,
        user: UserId,
    ) -> Result<bool, EngineError> {
        let Some(task) = self.store.task(task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::task::assign(caller, &task, resolution.role)?;

        self.ensure_assignable(user, task.project)?;
        Ok(self.store.insert_assignment(task.id, user)?)
    }

    /// Remove an assignment. Returns `false` when the user was not assigned.
    pub fn unassign(
        &mut self,
        caller: UserId,
        task: TaskId,
        user: UserId,
    ) -> Result<bool, EngineError> {
        let Some(task) = self.store.task(task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::task::assign(caller, &task, resolution.role)?;

        Ok(self.store.delete_assignment(task.id, user)?)
    }

    pub fn assignees(&self, caller: UserId, task: TaskId) -> Result<Vec<UserId>, EngineError> {
        let Some(task) = self.store.task(task)? else {
            return Err(EngineError::NotFound(Resource::Task));
        };
        let resolution = self.resolution_for(caller, &task)?;
        guard::task::view(resolution.role)?;

        let assignments = self.store.assignments_for_task(task.id)?;
        Ok(assignments.into_iter().map(|a| a.user).collect())
    }

    fn ensure_assignable(&self, user: UserId, project: ProjectId) -> Result<(), EngineError> {
        match self.store.membership(user, project)? {
            Some(_) => Ok(()),
            None => Err(EngineError::AssigneeNotMember),
        }
    }
}
