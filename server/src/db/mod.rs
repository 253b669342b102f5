//! In-memory per-user storage.
//!
//! Each user's state sits behind one `DashMap` entry. Writers hold the entry
//! lock for the whole operation and work on a draft copy, so concurrent
//! requests for the same user are serialized and a failed operation leaves
//! nothing behind.

pub mod card_repo;
pub mod inventory_repo;
pub mod models;
pub mod team_repo;

use crate::error::GameError;
use dashmap::{mapref::entry::Entry, DashMap};
use models::UserState;
use uuid::Uuid;

#[derive(Debug, Default)]
pub struct Store {
    users: DashMap<Uuid, UserState>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a snapshot of the user's state.
    pub fn read<T>(&self, user_id: Uuid, f: impl FnOnce(&UserState) -> T) -> T {
        match self.users.get(&user_id) {
            Some(state) => f(state.value()),
            None => f(&UserState::default()),
        }
    }

    /// Run `f` against a draft of the user's state, committing only on `Ok`.
    /// Unknown users get an entry only once `f` succeeds.
    pub fn transact<T>(
        &self,
        user_id: Uuid,
        f: impl FnOnce(&mut UserState) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        match self.users.entry(user_id) {
            Entry::Occupied(mut entry) => {
                let mut draft = entry.get().clone();
                let out = f(&mut draft)?;
                entry.insert(draft);
                Ok(out)
            }
            Entry::Vacant(entry) => {
                let mut draft = UserState::default();
                let out = f(&mut draft)?;
                entry.insert(draft);
                Ok(out)
            }
        }
    }

    /// Number of users with stored state.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }
}
