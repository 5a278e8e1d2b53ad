// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for engine tests.

use tasker_core::{NewProject, NewTask, NewUser, ProjectId, User};
use tasker_store::{MembershipStore, MemoryStore};

use crate::Engine;

/// Engine over a fresh in-memory store.
pub fn test_engine() -> Engine<MemoryStore> {
    Engine::new(MemoryStore::new())
}

/// Register a user, deriving the display name from the email's local part.
pub fn register(engine: &mut Engine<MemoryStore>, email: &str) -> User {
    let name = email.split('@').next().unwrap_or(email).to_string();
    engine
        .register_user(NewUser {
            email: email.to_string(),
            name,
        })
        .expect("fresh email registers")
}

/// A minimal project creation payload.
pub fn project_draft(name: &str) -> NewProject {
    NewProject {
        name: name.to_string(),
        description: String::new(),
        start_date: 20_260_101,
        end_date: None,
        status: Default::default(),
    }
}

/// A minimal task creation payload.
pub fn task_draft(project: ProjectId, title: &str) -> NewTask {
    NewTask {
        project,
        title: title.to_string(),
        description: String::new(),
        due_date: None,
        priority: Default::default(),
        status: Default::default(),
    }
}

/// Number of owner memberships on a project. Exactly one for every live project.
pub fn owner_count(engine: &Engine<MemoryStore>, project: ProjectId) -> usize {
    engine
        .store()
        .memberships_for_project(project)
        .expect("memory store reads do not fail")
        .iter()
        .filter(|membership| membership.role.is_owner())
        .count()
}

/// Route tracing output into the test captures. `RUST_LOG` filters apply.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
