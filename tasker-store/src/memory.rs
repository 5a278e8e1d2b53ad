// SPDX-License-Identifier: MIT OR Apache-2.0

use std::collections::{BTreeMap, HashMap};

use tasker_core::{
    Attachment, AttachmentId, Comment, CommentId, Membership, NewAttachment, NewComment,
    NewMembership, NewProject, NewSubtask, NewTask, NewUser, Project, ProjectId, Role, Subtask,
    SubtaskId, Task, TaskAssignment, TaskId, Timestamp, User, UserId,
};

use crate::traits::{
    AttachmentStore, CommentStore, Constraint, MembershipStore, ProjectStore, StoreError,
    SubtaskStore, TaskStore, UserStore,
};

/// In-memory reference implementation of the store traits.
///
/// Ids come from a single sequence and timestamps from a logical clock, so test fixtures are
/// fully deterministic. All uniqueness constraints are checked inside the inserting method,
/// under the same `&mut` borrow as the write: a conforming relational backend must reproduce
/// this with a transaction (for the one-owner rule, a partial unique index over
/// (project) where role = owner, or an equivalent serializable check-then-insert).
#[derive(Debug, Default)]
pub struct MemoryStore {
    ids: u64,
    clock: u64,
    users: HashMap<UserId, User>,
    emails: HashMap<String, UserId>,
    projects: HashMap<ProjectId, Project>,
    memberships: BTreeMap<(ProjectId, UserId), Membership>,
    tasks: HashMap<TaskId, Task>,
    assignments: BTreeMap<(TaskId, UserId), Timestamp>,
    subtasks: HashMap<SubtaskId, Subtask>,
    comments: HashMap<CommentId, Comment>,
    attachments: HashMap<AttachmentId, Attachment>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u64 {
        self.ids += 1;
        self.ids
    }

    fn tick(&mut self) -> Timestamp {
        self.clock += 1;
        self.clock
    }

    fn project_owner(&self, project: ProjectId) -> Option<UserId> {
        self.memberships
            .range((project, UserId(0))..=(project, UserId(u64::MAX)))
            .find(|(_, membership)| membership.role.is_owner())
            .map(|(_, membership)| membership.user)
    }
}

impl UserStore for MemoryStore {
    fn insert_user(&mut self, new: NewUser) -> Result<User, StoreError> {
        if self.emails.contains_key(&new.email) {
            return Err(StoreError::UniqueViolation(Constraint::DuplicateEmail));
        }

        let id = UserId(self.next_id());
        let user = User {
            id,
            email: new.email,
            name: new.name,
            joined_at: self.tick(),
        };
        self.emails.insert(user.email.clone(), id);
        self.users.insert(id, user.clone());
        Ok(user)
    }

    fn user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.get(&id).cloned())
    }

    fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .emails
            .get(email)
            .and_then(|id| self.users.get(id))
            .cloned())
    }
}

impl ProjectStore for MemoryStore {
    fn insert_project(
        &mut self,
        new: NewProject,
        created_by: UserId,
    ) -> Result<Project, StoreError> {
        let id = ProjectId(self.next_id());
        let project = Project {
            id,
            name: new.name,
            description: new.description,
            start_date: new.start_date,
            end_date: new.end_date,
            status: new.status,
            created_by,
            created_at: self.tick(),
        };
        self.projects.insert(id, project.clone());
        Ok(project)
    }

    fn project(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.get(&id).cloned())
    }

    fn update_project(&mut self, project: &Project) -> Result<bool, StoreError> {
        match self.projects.get_mut(&project.id) {
            Some(row) => {
                *row = project.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_project(&mut self, id: ProjectId) -> Result<bool, StoreError> {
        if self.projects.remove(&id).is_none() {
            return Ok(false);
        }

        let membership_keys: Vec<_> = self
            .memberships
            .range((id, UserId(0))..=(id, UserId(u64::MAX)))
            .map(|(key, _)| *key)
            .collect();
        for key in membership_keys {
            self.memberships.remove(&key);
        }

        let task_ids: Vec<_> = self
            .tasks
            .values()
            .filter(|task| task.project == id)
            .map(|task| task.id)
            .collect();
        for task_id in task_ids {
            self.delete_task(task_id)?;
        }

        Ok(true)
    }

    fn projects_for_user(&self, user: UserId) -> Result<Vec<Project>, StoreError> {
        let mut projects: Vec<_> = self
            .memberships
            .values()
            .filter(|membership| membership.user == user)
            .filter_map(|membership| self.projects.get(&membership.project))
            .cloned()
            .collect();
        projects.sort_by_key(|project| project.id);
        Ok(projects)
    }
}

impl MembershipStore for MemoryStore {
    fn insert_membership(&mut self, new: NewMembership) -> Result<Membership, StoreError> {
        let key = (new.project, new.user);
        if self.memberships.contains_key(&key) {
            return Err(StoreError::UniqueViolation(Constraint::DuplicateMembership));
        }
        if new.role.is_owner() && self.project_owner(new.project).is_some() {
            return Err(StoreError::UniqueViolation(Constraint::DuplicateOwner));
        }

        let membership = Membership {
            user: new.user,
            project: new.project,
            role: new.role,
        };
        self.memberships.insert(key, membership.clone());
        Ok(membership)
    }

    fn membership(
        &self,
        user: UserId,
        project: ProjectId,
    ) -> Result<Option<Membership>, StoreError> {
        Ok(self.memberships.get(&(project, user)).cloned())
    }

    fn update_membership_role(
        &mut self,
        user: UserId,
        project: ProjectId,
        role: Role,
    ) -> Result<Option<Membership>, StoreError> {
        if role.is_owner() {
            match self.project_owner(project) {
                Some(owner) if owner != user => {
                    return Err(StoreError::UniqueViolation(Constraint::DuplicateOwner));
                }
                _ => (),
            }
        }

        match self.memberships.get_mut(&(project, user)) {
            Some(row) => {
                row.role = role;
                Ok(Some(row.clone()))
            }
            None => Ok(None),
        }
    }

    fn memberships_for_project(&self, project: ProjectId) -> Result<Vec<Membership>, StoreError> {
        Ok(self
            .memberships
            .range((project, UserId(0))..=(project, UserId(u64::MAX)))
            .map(|(_, membership)| membership.clone())
            .collect())
    }
}

impl TaskStore for MemoryStore {
    fn insert_task(&mut self, new: NewTask, created_by: UserId) -> Result<Task, StoreError> {
        let id = TaskId(self.next_id());
        let task = Task {
            id,
            project: new.project,
            title: new.title,
            description: new.description,
            due_date: new.due_date,
            priority: new.priority,
            status: new.status,
            created_by,
            created_at: self.tick(),
        };
        self.tasks.insert(id, task.clone());
        Ok(task)
    }

    fn task(&self, id: TaskId) -> Result<Option<Task>, StoreError> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn update_task(&mut self, task: &Task) -> Result<bool, StoreError> {
        match self.tasks.get_mut(&task.id) {
            Some(row) => {
                *row = task.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_task(&mut self, id: TaskId) -> Result<bool, StoreError> {
        if self.tasks.remove(&id).is_none() {
            return Ok(false);
        }

        self.subtasks.retain(|_, subtask| subtask.task != id);
        self.comments.retain(|_, comment| comment.task != id);
        self.attachments.retain(|_, attachment| attachment.task != id);

        let assignment_keys: Vec<_> = self
            .assignments
            .range((id, UserId(0))..=(id, UserId(u64::MAX)))
            .map(|(key, _)| *key)
            .collect();
        for key in assignment_keys {
            self.assignments.remove(&key);
        }

        Ok(true)
    }

    fn tasks_for_project(&self, project: ProjectId) -> Result<Vec<Task>, StoreError> {
        let mut tasks: Vec<_> = self
            .tasks
            .values()
            .filter(|task| task.project == project)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.id);
        Ok(tasks)
    }

    fn insert_assignment(&mut self, task: TaskId, user: UserId) -> Result<bool, StoreError> {
        if self.assignments.contains_key(&(task, user)) {
            return Ok(false);
        }

        let now = self.tick();
        self.assignments.insert((task, user), now);
        Ok(true)
    }

    fn delete_assignment(&mut self, task: TaskId, user: UserId) -> Result<bool, StoreError> {
        Ok(self.assignments.remove(&(task, user)).is_some())
    }

    fn assignments_for_task(&self, task: TaskId) -> Result<Vec<TaskAssignment>, StoreError> {
        Ok(self
            .assignments
            .range((task, UserId(0))..=(task, UserId(u64::MAX)))
            .map(|((task, user), assigned_at)| TaskAssignment {
                task: *task,
                user: *user,
                assigned_at: *assigned_at,
            })
            .collect())
    }
}

impl SubtaskStore for MemoryStore {
    fn insert_subtask(&mut self, new: NewSubtask) -> Result<Subtask, StoreError> {
        let id = SubtaskId(self.next_id());
        let now = self.tick();
        let subtask = Subtask {
            id,
            task: new.task,
            title: new.title,
            status: new.status,
            created_at: now,
            updated_at: now,
        };
        self.subtasks.insert(id, subtask.clone());
        Ok(subtask)
    }

    fn subtask(&self, id: SubtaskId) -> Result<Option<Subtask>, StoreError> {
        Ok(self.subtasks.get(&id).cloned())
    }

    fn update_subtask(&mut self, subtask: &Subtask) -> Result<bool, StoreError> {
        let now = self.tick();
        match self.subtasks.get_mut(&subtask.id) {
            Some(row) => {
                *row = subtask.clone();
                row.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_subtask(&mut self, id: SubtaskId) -> Result<bool, StoreError> {
        Ok(self.subtasks.remove(&id).is_some())
    }

    fn subtasks_for_task(&self, task: TaskId) -> Result<Vec<Subtask>, StoreError> {
        let mut subtasks: Vec<_> = self
            .subtasks
            .values()
            .filter(|subtask| subtask.task == task)
            .cloned()
            .collect();
        subtasks.sort_by_key(|subtask| subtask.id);
        Ok(subtasks)
    }
}

impl CommentStore for MemoryStore {
    fn insert_comment(&mut self, new: NewComment, author: UserId) -> Result<Comment, StoreError> {
        let id = CommentId(self.next_id());
        let comment = Comment {
            id,
            task: new.task,
            author,
            content: new.content,
            created_at: self.tick(),
        };
        self.comments.insert(id, comment.clone());
        Ok(comment)
    }

    fn comment(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        Ok(self.comments.get(&id).cloned())
    }

    fn update_comment(&mut self, comment: &Comment) -> Result<bool, StoreError> {
        match self.comments.get_mut(&comment.id) {
            Some(row) => {
                *row = comment.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_comment(&mut self, id: CommentId) -> Result<bool, StoreError> {
        Ok(self.comments.remove(&id).is_some())
    }

    fn comments_for_task(&self, task: TaskId) -> Result<Vec<Comment>, StoreError> {
        let mut comments: Vec<_> = self
            .comments
            .values()
            .filter(|comment| comment.task == task)
            .cloned()
            .collect();
        comments.sort_by_key(|comment| comment.id);
        Ok(comments)
    }
}

impl AttachmentStore for MemoryStore {
    fn insert_attachment(
        &mut self,
        new: NewAttachment,
        uploaded_by: UserId,
    ) -> Result<Attachment, StoreError> {
        let id = AttachmentId(self.next_id());
        let attachment = Attachment {
            id,
            task: new.task,
            uploaded_by,
            file: new.file,
            uploaded_at: self.tick(),
        };
        self.attachments.insert(id, attachment.clone());
        Ok(attachment)
    }

    fn attachment(&self, id: AttachmentId) -> Result<Option<Attachment>, StoreError> {
        Ok(self.attachments.get(&id).cloned())
    }

    fn delete_attachment(&mut self, id: AttachmentId) -> Result<bool, StoreError> {
        Ok(self.attachments.remove(&id).is_some())
    }

    fn attachments_for_task(&self, task: TaskId) -> Result<Vec<Attachment>, StoreError> {
        let mut attachments: Vec<_> = self
            .attachments
            .values()
            .filter(|attachment| attachment.task == task)
            .cloned()
            .collect();
        attachments.sort_by_key(|attachment| attachment.id);
        Ok(attachments)
    }
}

#[cfg(test)]
mod tests {
    use tasker_core::{
        NewMembership, NewProject, NewSubtask, NewTask, NewUser, ProjectId, Role, TaskStatus,
        UserId,
    };

    use crate::traits::{
        Constraint, MembershipStore, ProjectStore, StoreError, SubtaskStore, TaskStore, UserStore,
    };

    use super::MemoryStore;

    fn user(store: &mut MemoryStore, email: &str) -> UserId {
        store
            .insert_user(NewUser {
                email: email.to_string(),
                name: email.split('@').next().unwrap().to_string(),
            })
            .unwrap()
            .id
    }

    fn project(store: &mut MemoryStore, owner: UserId) -> ProjectId {
        let project = store
            .insert_project(
                NewProject {
                    name: "Website relaunch".to_string(),
                    description: String::new(),
                    start_date: 20_260_101,
                    end_date: None,
                    status: Default::default(),
                },
                owner,
            )
            .unwrap();
        store
            .insert_membership(NewMembership {
                user: owner,
                project: project.id,
                role: Role::Owner,
            })
            .unwrap();
        project.id
    }

    #[test]
    fn duplicate_email_rejected() {
        let mut store = MemoryStore::new();
        user(&mut store, "ada@example.org");

        let result = store.insert_user(NewUser {
            email: "ada@example.org".to_string(),
            name: "Ada again".to_string(),
        });
        assert_eq!(
            result,
            Err(StoreError::UniqueViolation(Constraint::DuplicateEmail))
        );
    }

    #[test]
    fn at_most_one_owner_per_project() {
        let mut store = MemoryStore::new();
        let ada = user(&mut store, "ada@example.org");
        let bob = user(&mut store, "bob@example.org");
        let project = project(&mut store, ada);

        // A second owner row is rejected no matter which user it is for.
        let result = store.insert_membership(NewMembership {
            user: bob,
            project,
            role: Role::Owner,
        });
        assert_eq!(
            result,
            Err(StoreError::UniqueViolation(Constraint::DuplicateOwner))
        );

        // A second membership for the same user is rejected independently of role.
        let result = store.insert_membership(NewMembership {
            user: ada,
            project,
            role: Role::Member,
        });
        assert_eq!(
            result,
            Err(StoreError::UniqueViolation(Constraint::DuplicateMembership))
        );

        // Promoting an existing member to owner while another owner exists is also rejected.
        store
            .insert_membership(NewMembership {
                user: bob,
                project,
                role: Role::Member,
            })
            .unwrap();
        let result = store.update_membership_role(bob, project, Role::Owner);
        assert_eq!(
            result,
            Err(StoreError::UniqueViolation(Constraint::DuplicateOwner))
        );

        // Promoting to admin is fine.
        let membership = store
            .update_membership_role(bob, project, Role::Admin)
            .unwrap()
            .unwrap();
        assert_eq!(membership.role, Role::Admin);
    }

    #[test]
    fn racing_owner_inserts_admit_exactly_one() {
        let mut store = MemoryStore::new();
        let ada = user(&mut store, "ada@example.org");
        let bob = user(&mut store, "bob@example.org");
        let project = store
            .insert_project(
                NewProject {
                    name: "Race".to_string(),
                    description: String::new(),
                    start_date: 1,
                    end_date: None,
                    status: Default::default(),
                },
                ada,
            )
            .unwrap()
            .id;

        // Two back-to-back owner inserts model the closest serialization of two racing
        // requests; the constraint is checked in the same atomic step as the write, so
        // exactly one can ever win.
        let outcomes = [
            store.insert_membership(NewMembership {
                user: ada,
                project,
                role: Role::Owner,
            }),
            store.insert_membership(NewMembership {
                user: bob,
                project,
                role: Role::Owner,
            }),
        ];
        let winners = outcomes.iter().filter(|outcome| outcome.is_ok()).count();
        assert_eq!(winners, 1);
    }

    #[test]
    fn delete_project_cascades() {
        let mut store = MemoryStore::new();
        let ada = user(&mut store, "ada@example.org");
        let project_id = project(&mut store, ada);

        let task = store
            .insert_task(
                NewTask {
                    project: project_id,
                    title: "Ship it".to_string(),
                    description: String::new(),
                    due_date: None,
                    priority: Default::default(),
                    status: Default::default(),
                },
                ada,
            )
            .unwrap();
        store
            .insert_subtask(NewSubtask {
                task: task.id,
                title: "Step one".to_string(),
                status: TaskStatus::Todo,
            })
            .unwrap();
        store.insert_assignment(task.id, ada).unwrap();

        assert!(store.delete_project(project_id).unwrap());

        assert!(store.project(project_id).unwrap().is_none());
        assert!(store.membership(ada, project_id).unwrap().is_none());
        assert!(store.task(task.id).unwrap().is_none());
        assert!(store.subtasks_for_task(task.id).unwrap().is_empty());
        assert!(store.assignments_for_task(task.id).unwrap().is_empty());

        // Deleting again reports absence.
        assert!(!store.delete_project(project_id).unwrap());
    }

    #[test]
    fn assignment_is_idempotent() {
        let mut store = MemoryStore::new();
        let ada = user(&mut store, "ada@example.org");
        let project_id = project(&mut store, ada);
        let task = store
            .insert_task(
                NewTask {
                    project: project_id,
                    title: "Review".to_string(),
                    description: String::new(),
                    due_date: None,
                    priority: Default::default(),
                    status: Default::default(),
                },
                ada,
            )
            .unwrap();

        assert!(store.insert_assignment(task.id, ada).unwrap());
        assert!(!store.insert_assignment(task.id, ada).unwrap());

        let assignments = store.assignments_for_task(task.id).unwrap();
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].user, ada);
        assert_eq!(assignments[0].task, task.id);

        assert!(store.delete_assignment(task.id, ada).unwrap());
        assert!(!store.delete_assignment(task.id, ada).unwrap());
    }

    #[test]
    fn subtask_updates_bump_updated_at() {
        let mut store = MemoryStore::new();
        let ada = user(&mut store, "ada@example.org");
        let project_id = project(&mut store, ada);
        let task = store
            .insert_task(
                NewTask {
                    project: project_id,
                    title: "Review".to_string(),
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
                title: "Step one".to_string(),
                status: TaskStatus::Todo,
            })
            .unwrap();
        assert_eq!(subtask.created_at, subtask.updated_at);

        let mut changed = subtask.clone();
        changed.status = TaskStatus::Done;
        assert!(store.update_subtask(&changed).unwrap());

        let stored = store.subtask(subtask.id).unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::Done);
        assert!(stored.updated_at > subtask.updated_at);
    }
}
