// SPDX-License-Identifier: MIT OR Apache-2.0

use tasker_auth::guard;
use tasker_core::{
    Date, NewMembership, NewProject, Project, ProjectId, ProjectStatus, Role, UserId,
};
use tasker_store::Store;
use tracing::debug;

use crate::engine::Engine;
use crate::error::{EngineError, Resource};

/// Partial update of a project; `None` fields stay unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<ProjectStatus>,
}

impl<S> Engine<S>
where
    S: Store,
{
    /// Create a project. Any authenticated user may; the caller becomes creator and receives
    /// the single owner membership in the same isolation span as the project row.
    pub fn create_project(
        &mut self,
        caller: UserId,
        new: NewProject,
    ) -> Result<Project, EngineError> {
        let project = self.store.insert_project(new, caller)?;
        self.store.insert_membership(NewMembership {
            user: caller,
            project: project.id,
            role: Role::Owner,
        })?;
        debug!("project {} created by user {}", project.id, caller);
        Ok(project)
    }

    pub fn project(&self, caller: UserId, id: ProjectId) -> Result<Project, EngineError> {
        let Some(project) = self.store.project(id)? else {
            return Err(EngineError::NotFound(Resource::Project));
        };
        let resolution = self.resolution_for(caller, &project)?;
        guard::project::view(resolution.role)?;
        Ok(project)
    }

    /// Projects the caller holds a membership in. Everything else is invisible to them.
    pub fn projects(&self, caller: UserId) -> Result<Vec<Project>, EngineError> {
        Ok(self.store.projects_for_user(caller)?)
    }

    pub fn update_project(
        &mut self,
        caller: UserId,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> Result<Project, EngineError> {
        let Some(mut project) = self.store.project(id)? else {
            return Err(EngineError::NotFound(Resource::Project));
        };
        let resolution = self.resolution_for(caller, &project)?;
        guard::project::update(resolution.role)?;

        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        if let Some(start_date) = patch.start_date {
            project.start_date = start_date;
        }
        if let Some(end_date) = patch.end_date {
            project.end_date = Some(end_date);
        }
        if let Some(status) = patch.status {
            project.status = status;
        }

        if !self.store.update_project(&project)? {
            return Err(EngineError::NotFound(Resource::Project));
        }
        Ok(project)
    }

    /// Delete a project and everything nested below it.
    pub fn delete_project(&mut self, caller: UserId, id: ProjectId) -> Result<(), EngineError> {
        let Some(project) = self.store.project(id)? else {
            return Err(EngineError::NotFound(Resource::Project));
        };
        let resolution = self.resolution_for(caller, &project)?;
        guard::project::delete(resolution.role)?;

        self.store.delete_project(id)?;
        debug!("project {} deleted by user {}", id, caller);
        Ok(())
    }
}
