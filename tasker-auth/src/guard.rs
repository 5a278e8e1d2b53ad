// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-resource decision tables gating every mutating operation.
//!
//! Each guard composes the predicates from [`crate::predicate`] with the resource-specific
//! rules and nothing else; the caller is responsible for resolving the role against the
//! resource's anchor project first. Guards fail closed: whoever cannot be positively allowed
//! is denied.

use thiserror::Error;

use tasker_core::Role;

use crate::predicate::{is_admin_or_owner, is_member, is_owner, is_self_or_admin_or_owner};

/// A failed permission check, carrying the reason surfaced to the caller.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct Denied(&'static str);

impl Denied {
    pub fn reason(&self) -> &'static str {
        self.0
    }
}

fn ensure(allowed: bool, reason: &'static str) -> Result<(), Denied> {
    if allowed { Ok(()) } else { Err(Denied(reason)) }
}

pub mod project {
    use super::*;

    /// Any project member may view the project and its member list.
    pub fn view(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_member(role), "you are not a member of this project")
    }

    pub fn update(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_owner(role), "only the project owner can edit")
    }

    pub fn delete(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_owner(role), "only the project owner can delete")
    }
}

pub mod membership {
    use super::*;

    pub fn invite(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_owner(role), "only the owner can invite members")
    }

    pub fn change_role(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_owner(role), "only the project owner can change roles")
    }
}

pub mod task {
    use tasker_core::{Task, UserId};

    use super::*;

    pub fn create(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_member(role), "you are not a member of this project")
    }

    pub fn view(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_member(role), "you are not a member of this project")
    }

    /// The task creator may edit their own task; admins and the owner may edit any.
    pub fn update(caller: UserId, task: &Task, role: Option<Role>) -> Result<(), Denied> {
        ensure(
            is_self_or_admin_or_owner(caller, task, role),
            "you do not have permission to update this task",
        )
    }

    pub fn delete(role: Option<Role>) -> Result<(), Denied> {
        ensure(
            is_admin_or_owner(role),
            "only admins or the owner can delete tasks",
        )
    }

    /// Changing the assignee set follows the update rule.
    pub fn assign(caller: UserId, task: &Task, role: Option<Role>) -> Result<(), Denied> {
        ensure(
            is_self_or_admin_or_owner(caller, task, role),
            "only the task creator, admins or the owner can change assignees",
        )
    }
}

pub mod comment {
    use tasker_core::{Comment, UserId};

    use super::*;

    pub fn create(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_member(role), "you are not a member of this project")
    }

    pub fn update(caller: UserId, comment: &Comment, role: Option<Role>) -> Result<(), Denied> {
        ensure(
            is_self_or_admin_or_owner(caller, comment, role),
            "you cannot update this comment",
        )
    }

    pub fn delete(caller: UserId, comment: &Comment, role: Option<Role>) -> Result<(), Denied> {
        ensure(
            is_self_or_admin_or_owner(caller, comment, role),
            "you cannot delete this comment",
        )
    }
}

pub mod subtask {
    use tasker_core::{Task, UserId};

    use super::*;
    use crate::predicate::Authored;

    pub fn create(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_member(role), "you are not a member of this project")
    }

    /// Subtasks carry no author of their own: modification is reserved for the project owner
    /// and the parent task's creator. Admins are deliberately not included.
    pub fn modify(caller: UserId, parent: &Task, role: Option<Role>) -> Result<(), Denied> {
        ensure(
            is_owner(role) || parent.authored_by() == caller,
            "only the project owner or task creator can modify subtasks",
        )
    }
}

pub mod attachment {
    use tasker_core::{Attachment, UserId};

    use super::*;
    use crate::predicate::Authored;

    pub fn create(role: Option<Role>) -> Result<(), Denied> {
        ensure(is_member(role), "you are not a member of this project")
    }

    /// The uploader may remove their own file even as a plain member; otherwise only the
    /// project owner may. Ownership is resolved through the membership rows, never through a
    /// field on the project.
    pub fn delete(
        caller: UserId,
        attachment: &Attachment,
        role: Option<Role>,
    ) -> Result<(), Denied> {
        ensure(
            is_owner(role) || attachment.authored_by() == caller,
            "only the project owner or uploader can delete this file",
        )
    }
}

#[cfg(test)]
mod tests {
    use tasker_core::{
        Attachment, AttachmentId, Comment, CommentId, ProjectId, Role, Task, TaskId, UserId,
    };

    use super::{attachment, comment, membership, project, subtask, task};

    const CREATOR: UserId = UserId(1);
    const OTHER: UserId = UserId(2);

    fn task_by(created_by: UserId) -> Task {
        Task {
            id: TaskId(1),
            project: ProjectId(1),
            title: "Ship it".to_string(),
            description: String::new(),
            due_date: None,
            priority: Default::default(),
            status: Default::default(),
            created_by,
            created_at: 1,
        }
    }

    #[test]
    fn project_table() {
        for role in [Some(Role::Member), Some(Role::Admin), Some(Role::Owner)] {
            assert!(project::view(role).is_ok());
        }
        assert!(project::view(None).is_err());

        assert!(project::update(Some(Role::Owner)).is_ok());
        assert!(project::update(Some(Role::Admin)).is_err());
        assert!(project::delete(Some(Role::Owner)).is_ok());
        assert!(project::delete(Some(Role::Member)).is_err());
    }

    #[test]
    fn membership_table() {
        assert!(membership::invite(Some(Role::Owner)).is_ok());
        assert!(membership::invite(Some(Role::Admin)).is_err());
        assert!(membership::invite(None).is_err());

        assert!(membership::change_role(Some(Role::Owner)).is_ok());
        assert!(membership::change_role(Some(Role::Admin)).is_err());
    }

    #[test]
    fn task_table() {
        let task = task_by(CREATOR);

        assert!(task::create(Some(Role::Member)).is_ok());
        assert!(task::create(None).is_err());

        // Creator with a plain member role may update, another member may not.
        assert!(task::update(CREATOR, &task, Some(Role::Member)).is_ok());
        assert!(task::update(OTHER, &task, Some(Role::Member)).is_err());
        assert!(task::update(OTHER, &task, Some(Role::Admin)).is_ok());

        // Deletion requires admin or owner, creator status does not matter.
        assert!(task::delete(Some(Role::Member)).is_err());
        assert!(task::delete(Some(Role::Admin)).is_ok());
        assert!(task::delete(Some(Role::Owner)).is_ok());
    }

    #[test]
    fn comment_table() {
        let own = Comment {
            id: CommentId(1),
            task: TaskId(1),
            author: CREATOR,
            content: "note".to_string(),
            created_at: 1,
        };

        assert!(comment::update(CREATOR, &own, Some(Role::Member)).is_ok());
        assert!(comment::update(OTHER, &own, Some(Role::Member)).is_err());
        assert!(comment::delete(OTHER, &own, Some(Role::Admin)).is_ok());
        assert!(comment::delete(OTHER, &own, Some(Role::Member)).is_err());
    }

    #[test]
    fn subtask_table() {
        let parent = task_by(CREATOR);

        assert!(subtask::modify(CREATOR, &parent, Some(Role::Member)).is_ok());
        assert!(subtask::modify(OTHER, &parent, Some(Role::Owner)).is_ok());
        // Admins are not in the subtask rule.
        assert!(subtask::modify(OTHER, &parent, Some(Role::Admin)).is_err());
        assert!(subtask::modify(OTHER, &parent, Some(Role::Member)).is_err());
    }

    #[test]
    fn attachment_table() {
        let file = Attachment {
            id: AttachmentId(1),
            task: TaskId(1),
            uploaded_by: CREATOR,
            file: "attachments/notes.pdf".to_string(),
            uploaded_at: 1,
        };

        // The uploader passes as a plain member; admins do not.
        assert!(attachment::delete(CREATOR, &file, Some(Role::Member)).is_ok());
        assert!(attachment::delete(OTHER, &file, Some(Role::Owner)).is_ok());
        assert!(attachment::delete(OTHER, &file, Some(Role::Admin)).is_err());
        assert!(attachment::delete(OTHER, &file, Some(Role::Member)).is_err());
    }
}
