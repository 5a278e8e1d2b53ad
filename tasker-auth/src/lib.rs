// SPDX-License-Identifier: MIT OR Apache-2.0

//! Authorization layer for the tasker backend.
//!
//! Three pieces, kept deliberately small and pure:
//!
//! - [`predicate`]: the four permission predicates evaluated against a resolved role and
//!   resource ownership. This is the single source of permission logic; guards and callers
//!   import it, they never reimplement it.
//! - [`resolver`]: role lookup per (user, project) and the [`Anchored`] traversal that gives
//!   every nested resource exactly one path to its owning project.
//! - [`guard`]: per-resource decision tables combining the predicates with resource-specific
//!   rules. All denial paths fail closed.

pub mod guard;
mod predicate;
mod resolver;

pub use guard::Denied;
pub use predicate::{Authored, is_admin_or_owner, is_member, is_owner, is_self_or_admin_or_owner};
pub use resolver::{Anchored, Resolution, resolve, resolve_for};
