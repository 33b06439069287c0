//! User directory lookup
//!
//! Turns name seeds into a short list of candidate users. Implementations
//! return users whose username starts with any of the seeds, most relevant
//! first, without duplicates.

use crate::candidate::UserRef;
use crate::error::Result;
use std::collections::HashSet;

pub trait UserDirectory {
    fn find_by_name_seeds(&self, seeds: &HashSet<String>) -> Result<Vec<UserRef>>;
}

/// In-memory directory. Priority is insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryDirectory {
    users: Vec<UserRef>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user (keyed by user_id)
    pub fn insert(&mut self, user: UserRef) {
        match self.users.iter_mut().find(|u| u.user_id == user.user_id) {
            Some(existing) => *existing = user,
            None => self.users.push(user),
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl FromIterator<UserRef> for MemoryDirectory {
    fn from_iter<I: IntoIterator<Item = UserRef>>(iter: I) -> Self {
        let mut directory = Self::new();
        for user in iter {
            directory.insert(user);
        }
        directory
    }
}

impl UserDirectory for MemoryDirectory {
    fn find_by_name_seeds(&self, seeds: &HashSet<String>) -> Result<Vec<UserRef>> {
        Ok(self
            .users
            .iter()
            .filter(|u| seeds.iter().any(|seed| u.username.starts_with(seed.as_str())))
            .cloned()
            .collect())
    }
}
