// SPDX-License-Identifier: MIT OR Apache-2.0

use tasker_core::{Attachment, Comment, Role, Task, UserId};

/// Resources carrying an immutable record of who created them.
///
/// The field differs per resource type (task creator, comment author, attachment uploader) but
/// the ownership check is always the same identity comparison.
pub trait Authored {
    fn authored_by(&self) -> UserId;
}

impl Authored for Task {
    fn authored_by(&self) -> UserId {
        self.created_by
    }
}

impl Authored for Comment {
    fn authored_by(&self) -> UserId {
        self.author
    }
}

impl Authored for Attachment {
    fn authored_by(&self) -> UserId {
        self.uploaded_by
    }
}

/// True iff the resolved role is Owner.
pub fn is_owner(role: Option<Role>) -> bool {
    matches!(role, Some(Role::Owner))
}

/// True iff the resolved role is Admin or Owner.
pub fn is_admin_or_owner(role: Option<Role>) -> bool {
    matches!(role, Some(Role::Admin | Role::Owner))
}

/// True iff the caller holds any membership at all. "No role" is a value here, not an error.
pub fn is_member(role: Option<Role>) -> bool {
    role.is_some()
}

/// True iff the caller created the resource themselves, or holds Admin/Owner in the
/// surrounding project.
pub fn is_self_or_admin_or_owner(
    caller: UserId,
    resource: &impl Authored,
    role: Option<Role>,
) -> bool {
    resource.authored_by() == caller || is_admin_or_owner(role)
}

#[cfg(test)]
mod tests {
    use tasker_core::{Comment, CommentId, Role, TaskId, UserId};

    use super::{is_admin_or_owner, is_member, is_owner, is_self_or_admin_or_owner};

    fn comment_by(author: UserId) -> Comment {
        Comment {
            id: CommentId(1),
            task: TaskId(1),
            author,
            content: "looks good".to_string(),
            created_at: 1,
        }
    }

    #[test]
    fn role_predicates() {
        assert!(is_owner(Some(Role::Owner)));
        assert!(!is_owner(Some(Role::Admin)));
        assert!(!is_owner(None));

        assert!(is_admin_or_owner(Some(Role::Owner)));
        assert!(is_admin_or_owner(Some(Role::Admin)));
        assert!(!is_admin_or_owner(Some(Role::Member)));
        assert!(!is_admin_or_owner(None));

        assert!(is_member(Some(Role::Member)));
        assert!(is_member(Some(Role::Admin)));
        assert!(is_member(Some(Role::Owner)));
        assert!(!is_member(None));
    }

    #[test]
    fn ownership_predicate() {
        let ada = UserId(1);
        let bob = UserId(2);
        let comment = comment_by(ada);

        // The author passes regardless of role, even with no membership at all.
        assert!(is_self_or_admin_or_owner(ada, &comment, None));
        assert!(is_self_or_admin_or_owner(ada, &comment, Some(Role::Member)));

        // Everyone else needs admin or owner.
        assert!(!is_self_or_admin_or_owner(bob, &comment, None));
        assert!(!is_self_or_admin_or_owner(bob, &comment, Some(Role::Member)));
        assert!(is_self_or_admin_or_owner(bob, &comment, Some(Role::Admin)));
        assert!(is_self_or_admin_or_owner(bob, &comment, Some(Role::Owner)));
    }
}
