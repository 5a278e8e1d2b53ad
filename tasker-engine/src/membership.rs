// SPDX-License-Identifier: MIT OR Apache-2.0

use tasker_auth::guard;
use tasker_core::{Membership, NewMembership, ProjectId, Role, UserId};
use tasker_store::Store;
use tracing::debug;

use crate::engine::Engine;
use crate::error::{EngineError, Resource};

impl<S> Engine<S>
where
    S: Store,
{
    /// Invite a user into a project by email. Owner only.
    ///
    /// Invites always create a plain member; elevation happens separately through
    /// [`Engine::update_member_role`]. A duplicate invite surfaces [`EngineError::AlreadyMember`]
    /// rather than succeeding silently.
    pub fn invite(
        &mut self,
        caller: UserId,
        project: ProjectId,
        email: &str,
    ) -> Result<Membership, EngineError> {
        let Some(project) = self.store.project(project)? else {
            return Err(EngineError::NotFound(Resource::Project));
        };
        let resolution = self.resolution_for(caller, &project)?;
        guard::membership::invite(resolution.role)?;

        let Some(target) = self.store.user_by_email(email)? else {
            return Err(EngineError::UserNotFound);
        };

        let membership = self.store.insert_membership(NewMembership {
            user: target.id,
            project: project.id,
            role: Role::Member,
        })?;
        debug!("user {} invited to project {}", target.id, project.id);
        Ok(membership)
    }

    /// Change a member's role. Owner only; only admin and member can be granted, and the
    /// owner's own membership is untouchable through this path.
    pub fn update_member_role(
        &mut self,
        caller: UserId,
        project: ProjectId,
        target: UserId,
        role: Role,
    ) -> Result<Membership, EngineError> {
        let Some(project) = self.store.project(project)? else {
            return Err(EngineError::NotFound(Resource::Project));
        };
        let resolution = self.resolution_for(caller, &project)?;
        guard::membership::change_role(resolution.role)?;

        if role.is_owner() {
            return Err(EngineError::InvalidRole);
        }

        let Some(current) = self.store.membership(target, project.id)? else {
            return Err(EngineError::NotFound(Resource::Membership));
        };
        if current.role.is_owner() {
            return Err(EngineError::CannotModifyOwner);
        }

        self.store
            .update_membership_role(target, project.id, role)?
            .ok_or(EngineError::NotFound(Resource::Membership))
    }

    /// The member list of a project, visible to members.
    pub fn members(
        &self,
        caller: UserId,
        project: ProjectId,
    ) -> Result<Vec<Membership>, EngineError> {
        let Some(project) = self.store.project(project)? else {
            return Err(EngineError::NotFound(Resource::Project));
        };
        let resolution = self.resolution_for(caller, &project)?;
        guard::project::view(resolution.role)?;

        Ok(self.store.memberships_for_project(project.id)?)
    }
}
