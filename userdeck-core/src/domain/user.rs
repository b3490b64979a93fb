//! User domain model
//!
//! The backend names the display-name field `nome` on the wire; the Rust
//! side calls it `name` and keeps the literal only in the serde attribute.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::result::{Error, Result};

/// A user record as confirmed by the remote service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned, opaque identifier
    pub id: String,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Return a copy with one field replaced
    pub fn with_field(&self, field: UserField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        match field {
            UserField::Name => next.name = value.into(),
            UserField::Email => next.email = value.into(),
        }
        next
    }

    /// The update body for this record's current name and email
    pub fn patch(&self) -> UserPatch {
        UserPatch {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Unconfirmed user held by the creation form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDraft {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    pub fn set(&mut self, field: UserField, value: impl Into<String>) {
        match field {
            UserField::Name => self.name = value.into(),
            UserField::Email => self.email = value.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }

    /// Same checks the creation form applies before it may be submitted
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, &self.email)
    }
}

/// Body of `PUT /users/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

impl UserPatch {
    pub fn validate(&self) -> Result<()> {
        validate_fields(&self.name, &self.email)
    }
}

/// Editable attributes of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
}

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    // Loose shape check, equivalent to an HTML email input
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+$").expect("valid email regex"))
}

fn validate_fields(name: &str, email: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::validation("Name is required"));
    }
    if email.trim().is_empty() {
        return Err(Error::validation("Email is required"));
    }
    // Checked untrimmed: the value is sent exactly as typed
    if !email_regex().is_match(email) {
        return Err(Error::validation(format!("Invalid email address: {:?}", email)));
    }
    Ok(())
}
