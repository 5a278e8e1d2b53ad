// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt::Display;

use tasker_auth::Denied;
use tasker_store::{Constraint, StoreError};
use thiserror::Error;

/// Resource types named in not-found results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    User,
    Project,
    Membership,
    Task,
    Subtask,
    Comment,
    Attachment,
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Resource::User => "user",
            Resource::Project => "project",
            Resource::Membership => "membership",
            Resource::Task => "task",
            Resource::Subtask => "subtask",
            Resource::Comment => "comment",
            Resource::Attachment => "attachment",
        };

        write!(f, "{}", s)
    }
}

/// Everything an operation can fail with.
///
/// Variants carry the specific reason; [`EngineError::kind`] collapses them into the
/// four-way classification an HTTP layer maps onto status codes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// The addressed resource, or the anchor needed to authorize against it, is absent.
    #[error("{0} not found")]
    NotFound(Resource),

    /// A guard denied the operation.
    #[error("permission denied: {0}")]
    Forbidden(#[from] Denied),

    /// Invite target does not exist by email.
    #[error("no user with this email exists")]
    UserNotFound,

    /// Invite target already holds a membership. Surfaced as an error on purpose, not
    /// swallowed as idempotent success.
    #[error("user is already a project member")]
    AlreadyMember,

    #[error("this project already has an owner")]
    OwnerConflict,

    #[error("this email address is already registered")]
    EmailTaken,

    /// Role changes only ever grant admin or member; the owner role is not reachable here.
    #[error("role must be either admin or member")]
    InvalidRole,

    #[error("cannot change the owner's role")]
    CannotModifyOwner,

    #[error("assignees must be project members")]
    AssigneeNotMember,

    /// Store backend failure. Constraint violations never surface here, they are translated
    /// into the conflict variants above.
    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for EngineError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::UniqueViolation(Constraint::DuplicateMembership) => {
                EngineError::AlreadyMember
            }
            StoreError::UniqueViolation(Constraint::DuplicateOwner) => EngineError::OwnerConflict,
            StoreError::UniqueViolation(Constraint::DuplicateEmail) => EngineError::EmailTaken,
            other => EngineError::Store(other),
        }
    }
}

/// HTTP-equivalent classification of engine errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Conflict,
    Validation,
    Internal,
}

impl EngineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::NotFound(_) | EngineError::UserNotFound => ErrorKind::NotFound,
            EngineError::Forbidden(_) | EngineError::CannotModifyOwner => ErrorKind::Forbidden,
            EngineError::AlreadyMember | EngineError::OwnerConflict | EngineError::EmailTaken => {
                ErrorKind::Conflict
            }
            EngineError::InvalidRole | EngineError::AssigneeNotMember => ErrorKind::Validation,
            EngineError::Store(_) => ErrorKind::Internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use tasker_store::{Constraint, StoreError};

    use super::{EngineError, ErrorKind};

    #[test]
    fn constraint_violations_become_conflicts() {
        let error: EngineError =
            StoreError::UniqueViolation(Constraint::DuplicateMembership).into();
        assert_eq!(error, EngineError::AlreadyMember);
        assert_eq!(error.kind(), ErrorKind::Conflict);

        let error: EngineError = StoreError::UniqueViolation(Constraint::DuplicateOwner).into();
        assert_eq!(error, EngineError::OwnerConflict);
        assert_eq!(error.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn backend_errors_stay_internal() {
        let error: EngineError = StoreError::Backend("connection reset".to_string()).into();
        assert_eq!(error.kind(), ErrorKind::Internal);
    }
}
