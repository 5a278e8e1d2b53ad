// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use tasker_core::{
    Attachment, AttachmentId, Comment, CommentId, Membership, NewAttachment, NewComment,
    NewMembership, NewProject, NewSubtask, NewTask, NewUser, Project, ProjectId, Role, Subtask,
    SubtaskId, Task, TaskAssignment, TaskId, User, UserId,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write. The check is evaluated atomically with the
    /// write itself, so two racing inserts can never both succeed.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(Constraint),

    #[error("store backend error: {0}")]
    Backend(String),
}

/// The uniqueness constraints a conforming store must enforce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constraint {
    /// Unique (user, project) pair on membership rows.
    DuplicateMembership,

    /// At most one membership with the owner role per project.
    DuplicateOwner,

    /// Unique email across users.
    DuplicateEmail,
}

impl Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Constraint::DuplicateMembership => "duplicate membership for (user, project)",
            Constraint::DuplicateOwner => "second owner membership for project",
            Constraint::DuplicateEmail => "duplicate user email",
        };

        write!(f, "{}", s)
    }
}

pub trait UserStore {
    /// Register a user. Fails on a duplicate email.
    fn insert_user(&mut self, new: NewUser) -> Result<User, StoreError>;

    fn user(&self, id: UserId) -> Result<Option<User>, StoreError>;

    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;
}

pub trait ProjectStore {
    fn insert_project(&mut self, new: NewProject, created_by: UserId)
    -> Result<Project, StoreError>;

    fn project(&self, id: ProjectId) -> Result<Option<Project>, StoreError>;

    /// Replace a project row. Returns `false` when the project does not exist.
    fn update_project(&mut self, project: &Project) -> Result<bool, StoreError>;

    /// Delete a project together with its memberships, tasks and everything nested below.
    ///
    /// Returns `false` when the project does not exist.
    fn delete_project(&mut self, id: ProjectId) -> Result<bool, StoreError>;

    /// All projects the user holds a membership in.
    fn projects_for_user(&self, user: UserId) -> Result<Vec<Project>, StoreError>;
}

pub trait MembershipStore {
    /// Insert a membership row.
    ///
    /// Both uniqueness constraints ([`Constraint::DuplicateMembership`],
    /// [`Constraint::DuplicateOwner`]) are checked in the same atomic step as the insert.
    fn insert_membership(&mut self, new: NewMembership) -> Result<Membership, StoreError>;

    fn membership(&self, user: UserId, project: ProjectId)
    -> Result<Option<Membership>, StoreError>;

    /// Change the role on an existing membership row. Returns `None` when no row exists for
    /// (user, project). Setting the owner role is subject to [`Constraint::DuplicateOwner`].
    fn update_membership_role(
        &mut self,
        user: UserId,
        project: ProjectId,
        role: Role,
    ) -> Result<Option<Membership>, StoreError>;

    fn memberships_for_project(&self, project: ProjectId) -> Result<Vec<Membership>, StoreError>;
}

pub trait TaskStore {
    fn insert_task(&mut self, new: NewTask, created_by: UserId) -> Result<Task, StoreError>;

    fn task(&self, id: TaskId) -> Result<Option<Task>, StoreError>;

    /// Replace a task row. Returns `false` when the task does not exist.
    fn update_task(&mut self, task: &Task) -> Result<bool, StoreError>;

    /// Delete a task together with its subtasks, comments, attachments and assignments.
    ///
    /// Returns `false` when the task does not exist.
    fn delete_task(&mut self, id: TaskId) -> Result<bool, StoreError>;

    fn tasks_for_project(&self, project: ProjectId) -> Result<Vec<Task>, StoreError>;

    /// Assign a user to a task.
    ///
    /// Returns `true` when the insert occurred, or `false` when the assignment already existed
    /// and no insertion occurred.
    fn insert_assignment(&mut self, task: TaskId, user: UserId) -> Result<bool, StoreError>;

    /// Remove an assignment. Returns `false` when the user was not assigned.
    fn delete_assignment(&mut self, task: TaskId, user: UserId) -> Result<bool, StoreError>;

    fn assignments_for_task(&self, task: TaskId) -> Result<Vec<TaskAssignment>, StoreError>;
}

pub trait SubtaskStore {
    fn insert_subtask(&mut self, new: NewSubtask) -> Result<Subtask, StoreError>;

    fn subtask(&self, id: SubtaskId) -> Result<Option<Subtask>, StoreError>;

    /// Replace a subtask row, bumping its `updated_at`. Returns `false` when it does not exist.
    fn update_subtask(&mut self, subtask: &Subtask) -> Result<bool, StoreError>;

    fn delete_subtask(&mut self, id: SubtaskId) -> Result<bool, StoreError>;

    fn subtasks_for_task(&self, task: TaskId) -> Result<Vec<Subtask>, StoreError>;
}

pub trait CommentStore {
    fn insert_comment(&mut self, new: NewComment, author: UserId) -> Result<Comment, StoreError>;

    fn comment(&self, id: CommentId) -> Result<Option<Comment>, StoreError>;

    /// Replace a comment row. Returns `false` when the comment does not exist.
    fn update_comment(&mut self, comment: &Comment) -> Result<bool, StoreError>;

    fn delete_comment(&mut self, id: CommentId) -> Result<bool, StoreError>;

    fn comments_for_task(&self, task: TaskId) -> Result<Vec<Comment>, StoreError>;
}

pub trait AttachmentStore {
    fn insert_attachment(
        &mut self,
        new: NewAttachment,
        uploaded_by: UserId,
    ) -> Result<Attachment, StoreError>;

    fn attachment(&self, id: AttachmentId) -> Result<Option<Attachment>, StoreError>;

    fn delete_attachment(&mut self, id: AttachmentId) -> Result<bool, StoreError>;

    fn attachments_for_task(&self, task: TaskId) -> Result<Vec<Attachment>, StoreError>;
}

/// The combined store surface the engine operates on.
///
/// Callers hold exclusive (`&mut`) access to a store for the duration of one operation, which
/// scopes role resolution and the subsequent write into a single isolation span. Backends
/// mapping these traits onto a relational database must provide the same guarantee through a
/// transaction.
pub trait Store:
    UserStore
    + ProjectStore
    + MembershipStore
    + TaskStore
    + SubtaskStore
    + CommentStore
    + AttachmentStore
{
}

impl<S> Store for S where
    S: UserStore
        + ProjectStore
        + MembershipStore
        + TaskStore
        + SubtaskStore
        + CommentStore
        + AttachmentStore
{
}
