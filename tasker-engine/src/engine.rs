// SPDX-License-Identifier: MIT OR Apache-2.0

use tasker_auth::{Anchored, Resolution, resolve_for};
use tasker_core::{NewUser, User, UserId};
use tasker_store::Store;

use crate::error::{EngineError, Resource};

/// Authorized operation surface of the backend: one method per (resource-type, operation)
/// pair.
///
/// Every call borrows the store mutably for its whole duration, so role resolution and the
/// guarded write happen within one isolation span. The caller identity is supplied by the
/// surrounding authentication layer; the engine only ever authorizes.
#[derive(Debug)]
pub struct Engine<S> {
    pub(crate) store: S,
}

impl<S> Engine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read-only access to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S> Engine<S>
where
    S: Store,
{
    /// Register a user. This is account provisioning, not an authorized mutation: there is no
    /// caller to resolve.
    pub fn register_user(&mut self, new: NewUser) -> Result<User, EngineError> {
        Ok(self.store.insert_user(new)?)
    }

    /// Anchored role resolution, failing closed. An unresolvable anchor can only mean the
    /// parent task of a nested resource is gone, so it reports the task as missing.
    pub(crate) fn resolution_for<R>(
        &self,
        caller: UserId,
        resource: &R,
    ) -> Result<Resolution, EngineError>
    where
        R: Anchored,
    {
        match resolve_for(&self.store, caller, resource)? {
            Some(resolution) => Ok(resolution),
            None => Err(EngineError::NotFound(Resource::Task)),
        }
    }
}
