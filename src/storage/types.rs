//! Record types for the in-memory store.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chat message inside a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// UUID v7 (time-sortable).
    pub id: String,
    pub role: Role,
    pub content: String,
    /// RFC 3339 creation timestamp.
    pub timestamp: String,
}

impl Message {
    /// Build a message with a fresh id and the current timestamp.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::now_v7().to_string(),
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// A registered user. Authentication itself is out of scope; the record
/// exists so companions can be attributed to an owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

/// A configured companion: identity, avatar, and conversational style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Companion {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_photo_url: Option<String>,
    /// Personality key, parsed leniently at generation time.
    pub personality: String,
    pub voice_type: String,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Fields accepted when creating a companion.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCompanion {
    pub user_id: Option<u64>,
    pub name: String,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub original_photo_url: Option<String>,
    pub personality: Option<String>,
    pub voice_type: Option<String>,
}

/// Partial update for a companion. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanionUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub avatar_url: Option<String>,
    pub original_photo_url: Option<String>,
    pub personality: Option<String>,
    pub voice_type: Option<String>,
}

/// A companion's message history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: u64,
    pub companion_id: u64,
    pub messages: Vec<Message>,
    /// RFC 3339 timestamp of the last update.
    pub updated_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_factory_assigns_unique_ids() {
        let a = Message::new(Role::User, "hello");
        let b = Message::new(Role::User, "hello");
        assert_ne!(a.id, b.id);
        assert_eq!(a.content, "hello");
        assert_eq!(a.role, Role::User);
        assert!(!a.timestamp.is_empty());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
    }
}
