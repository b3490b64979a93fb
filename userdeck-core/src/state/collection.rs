//! Ordered collection of confirmed user records

use tracing::warn;

use crate::domain::User;

/// Users in server order (initial load) followed by creations in append order
///
/// The four mutators are only ever called after the matching remote call
/// reported success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserCollectionState {
    users: Vec<User>,
}

impl UserCollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly listed collection
    pub fn replace_all(&mut self, users: Vec<User>) {
        self.users = users;
    }

    /// Add a newly created user at the end
    ///
    /// Ids are not deduplicated; a collision is logged and the record is
    /// appended anyway.
    pub fn append(&mut self, user: User) {
        if self.contains(&user.id) {
            warn!(id = %user.id, "appending user whose id is already present");
        }
        self.users.push(user);
    }

    /// Replace the record with the same id, keeping its position
    ///
    /// Returns `false` (and changes nothing) when no record has that id.
    pub fn apply_update(&mut self, user: User) -> bool {
        match self.users.iter_mut().find(|u| u.id == user.id) {
            Some(slot) => {
                *slot = user;
                true
            }
            None => false,
        }
    }

    /// Remove the first record with this id; `false` if there was none
    pub fn remove(&mut self, id: &str) -> bool {
        match self.users.iter().position(|u| u.id == id) {
            Some(index) => {
                self.users.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
