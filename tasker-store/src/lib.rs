// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence interfaces for the tasker backend.
//!
//! The engine is written against small per-entity traits so that the actual persistence engine
//! stays out of the core. [`MemoryStore`] is the reference implementation; it doubles as the
//! fixture store for the whole test suite.
//!
//! Two contracts every backend must honour:
//!
//! - Uniqueness constraints (unique email, unique (user, project) membership, one owner per
//!   project) are evaluated atomically with the write. A check-then-insert split across two
//!   statements is not conforming: two racing owner inserts must never both succeed.
//! - A caller holding `&mut` access performs role resolution and the guarded write as one
//!   isolation span. Relational backends map this onto a transaction with snapshot-consistent
//!   reads.

mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::{
    AttachmentStore, CommentStore, Constraint, MembershipStore, ProjectStore, Store, StoreError,
    SubtaskStore, TaskStore, UserStore,
};
