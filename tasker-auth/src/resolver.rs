// SPDX-License-Identifier: MIT OR Apache-2.0

use tasker_core::{Attachment, Comment, Project, ProjectId, Role, Subtask, Task, UserId};
use tasker_store::{MembershipStore, StoreError, TaskStore};

/// Effective role of a user within a project, or `None` when no membership row exists.
pub fn resolve<S>(store: &S, user: UserId, project: ProjectId) -> Result<Option<Role>, StoreError>
where
    S: MembershipStore,
{
    Ok(store.membership(user, project)?.map(|membership| membership.role))
}

/// Traversal from a resource to the project it belongs to.
///
/// Every resource type has exactly one path: a project is its own anchor, a task points at its
/// project, and subtasks, comments and attachments go through their parent task. Guards anchor
/// role resolution on this path; anchoring on anything else checks permissions against the
/// wrong project and silently disables the guard.
pub trait Anchored {
    /// The owning project, or `None` when the path is dangling (parent task gone). Callers
    /// must deny on `None`.
    fn project_anchor<S>(&self, store: &S) -> Result<Option<ProjectId>, StoreError>
    where
        S: TaskStore;
}

impl Anchored for Project {
    fn project_anchor<S>(&self, _store: &S) -> Result<Option<ProjectId>, StoreError>
    where
        S: TaskStore,
    {
        Ok(Some(self.id))
    }
}

impl Anchored for Task {
    fn project_anchor<S>(&self, _store: &S) -> Result<Option<ProjectId>, StoreError>
    where
        S: TaskStore,
    {
        Ok(Some(self.project))
    }
}

impl Anchored for Subtask {
    fn project_anchor<S>(&self, store: &S) -> Result<Option<ProjectId>, StoreError>
    where
        S: TaskStore,
    {
        Ok(store.task(self.task)?.map(|task| task.project))
    }
}

impl Anchored for Comment {
    fn project_anchor<S>(&self, store: &S) -> Result<Option<ProjectId>, StoreError>
    where
        S: TaskStore,
    {
        Ok(store.task(self.task)?.map(|task| task.project))
    }
}

impl Anchored for Attachment {
    fn project_anchor<S>(&self, store: &S) -> Result<Option<ProjectId>, StoreError>
    where
        S: TaskStore,
    {
        Ok(store.task(self.task)?.map(|task| task.project))
    }
}

/// Outcome of anchored role resolution: the project the resource hangs under and the caller's
/// role in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub project: ProjectId,
    pub role: Option<Role>,
}

/// Resolve the caller's role against the project owning `resource`.
///
/// Returns `None` when the anchor cannot be resolved; every guard fails closed on that.
pub fn resolve_for<R, S>(
    store: &S,
    caller: UserId,
    resource: &R,
) -> Result<Option<Resolution>, StoreError>
where
    R: Anchored,
    S: TaskStore + MembershipStore,
{
    let Some(project) = resource.project_anchor(store)? else {
        return Ok(None);
    };
    let role = resolve(store, caller, project)?;
    Ok(Some(Resolution { project, role }))
}

#[cfg(test)]
mod tests {
    use tasker_core::{
        NewAttachment, NewComment, NewMembership, NewProject, NewSubtask, NewTask, NewUser, Role,
        Subtask, SubtaskId, TaskId, TaskStatus,
    };
    use tasker_store::{
        AttachmentStore, CommentStore, MembershipStore, MemoryStore, ProjectStore, SubtaskStore,
        TaskStore, UserStore,
    };

    use super::{Anchored, resolve, resolve_for};

    #[test]
    fn resolve_reflects_membership_rows() {
        let mut store = MemoryStore::new();
        let ada = store
            .insert_user(NewUser {
                email: "ada@example.org".to_string(),
                name: "Ada".to_string(),
            })
            .unwrap()
            .id;
        let project = store
            .insert_project(
                NewProject {
                    name: "Relaunch".to_string(),
                    description: String::new(),
                    start_date: 1,
                    end_date: None,
                    status: Default::default(),
                },
                ada,
            )
            .unwrap()
            .id;

        // No membership row, no role.
        assert_eq!(resolve(&store, ada, project).unwrap(), None);

        store
            .insert_membership(NewMembership {
                user: ada,
                project,
                role: Role::Owner,
            })
            .unwrap();
        assert_eq!(resolve(&store, ada, project).unwrap(), Some(Role::Owner));
    }

    #[test]
    fn anchors_follow_the_parent_chain() {
        let mut store = MemoryStore::new();
        let ada = store
            .insert_user(NewUser {
                email: "ada@example.org".to_string(),
                name: "Ada".to_string(),
            })
            .unwrap()
            .id;

        // Two projects with a task each, so a wrong anchor would be observable.
        let mut anchors = Vec::new();
        for name in ["One", "Two"] {
            let project = store
                .insert_project(
                    NewProject {
                        name: name.to_string(),
                        description: String::new(),
                        start_date: 1,
                        end_date: None,
                        status: Default::default(),
                    },
                    ada,
                )
                .unwrap()
                .id;
            let task = store
                .insert_task(
                    NewTask {
                        project,
                        title: format!("Task in {}", name),
                        description: String::new(),
                        due_date: None,
                        priority: Default::default(),
                        status: Default::default(),
                    },
                    ada,
                )
                .unwrap();
            let subtask = store
                .insert_subtask(NewSubtask {
                    task: task.id,
                    title: "Step".to_string(),
                    status: TaskStatus::Todo,
                })
                .unwrap();
            let comment = store
                .insert_comment(
                    NewComment {
                        task: task.id,
                        content: "note".to_string(),
                    },
                    ada,
                )
                .unwrap();
            let attachment = store
                .insert_attachment(
                    NewAttachment {
                        task: task.id,
                        file: format!("attachments/{}.pdf", name),
                    },
                    ada,
                )
                .unwrap();
            anchors.push((project, task, subtask, comment, attachment));
        }

        for (project, task, subtask, comment, attachment) in &anchors {
            assert_eq!(task.project_anchor(&store).unwrap(), Some(*project));
            assert_eq!(subtask.project_anchor(&store).unwrap(), Some(*project));
            assert_eq!(comment.project_anchor(&store).unwrap(), Some(*project));
            assert_eq!(attachment.project_anchor(&store).unwrap(), Some(*project));
        }
    }

    #[test]
    fn dangling_anchor_resolves_to_none() {
        let store = MemoryStore::new();
        let orphan = Subtask {
            id: SubtaskId(99),
            task: TaskId(42),
            title: "Orphan".to_string(),
            status: TaskStatus::Todo,
            created_at: 1,
            updated_at: 1,
        };

        assert_eq!(orphan.project_anchor(&store).unwrap(), None);
        assert_eq!(
            resolve_for(&store, tasker_core::UserId(1), &orphan).unwrap(),
            None
        );
    }
}
