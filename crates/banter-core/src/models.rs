//! Data models for Banter
//!
//! Defines the core data structures: ChatMessage and Role.
//! These models map directly onto the JSON wire format, with `id` acting
//! as the reconciliation key across clients.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sender classification for a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A human participant
    User,
    /// An automated participant
    Assistant,
}

/// A single chat message in a room
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Unique identifier, assigned once at creation and never changed
    pub id: String,
    /// Message body
    pub content: String,
    /// Display name of the author
    pub user: String,
    /// Sender classification
    pub role: Role,
}

impl ChatMessage {
    /// Create a new message with a freshly generated id
    pub fn new(content: impl Into<String>, user: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            user: user.into(),
            role,
        }
    }

    /// Create a message with a specific id (for tests and replayed events)
    pub fn with_id(
        id: impl Into<String>,
        content: impl Into<String>,
        user: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            user: user.into(),
            role,
        }
    }

    /// Overwrite this message's mutable fields from another copy of the
    /// same message. The id is never touched.
    pub fn merge_from(&mut self, other: &ChatMessage) {
        self.content = other.content.clone();
        self.user = other.user.clone();
        self.role = other.role;
    }
}
