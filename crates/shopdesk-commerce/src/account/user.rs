//! User type.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::services::Resource;

/// A user record as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Assigned by the API on creation; absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl User {
    /// Create an unsaved user.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            avatar: None,
        }
    }

    /// Set the id.
    pub fn with_id(mut self, id: impl Into<UserId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the avatar URL.
    pub fn with_avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }
}

impl Resource for User {
    type Id = UserId;

    const COLLECTION: &'static str = "/users";
    const NOUN: &'static str = "user";
    const NOUN_PLURAL: &'static str = "users";
}
