//! Single edit target
//!
//! ```text
//! Empty --begin--> Editing(u) --change_field--> Editing(u')
//!   ^                  |
//!   +--cancel/finish---+
//! ```
//!
//! The snapshot is a detached copy: changing it never touches the user
//! collection. Submission is driven by the controller, which calls `finish`
//! only after the remote update succeeded.

use crate::domain::{User, UserField};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Empty,
    Editing(User),
}

impl EditSession {
    /// Start editing a copy of `user`, replacing any current target
    pub fn begin(&mut self, user: &User) {
        *self = EditSession::Editing(user.clone());
    }

    /// Replace one field of the snapshot; `false` when nothing is being edited
    pub fn change_field(&mut self, field: UserField, value: impl Into<String>) -> bool {
        match self {
            EditSession::Editing(user) => {
                *user = user.with_field(field, value);
                true
            }
            EditSession::Empty => false,
        }
    }

    /// Drop the snapshot without submitting
    pub fn cancel(&mut self) {
        *self = EditSession::Empty;
    }

    /// Close the session after a confirmed update
    pub fn finish(&mut self) -> Option<User> {
        match std::mem::take(self) {
            EditSession::Editing(user) => Some(user),
            EditSession::Empty => None,
        }
    }

    pub fn editing(&self) -> Option<&User> {
        match self {
            EditSession::Editing(user) => Some(user),
            EditSession::Empty => None,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditSession::Editing(_))
    }
}
