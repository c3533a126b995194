//! In-memory record store for users, companions, and conversations.
//!
//! A simple keyed store: each record family has its own map and its own
//! [`IdSequence`], so ids are allocated by the store that owns them rather
//! than by module-level globals. The server wraps one [`MemStore`] in a
//! mutex; individual operations are cheap map lookups.

#![allow(dead_code)]

pub mod types;

use std::collections::HashMap;

use types::{Companion, CompanionUpdate, Conversation, Message, NewCompanion, User};

/// Monotonic id allocator, one per record family.
#[derive(Debug, Default)]
struct IdSequence(u64);

impl IdSequence {
    fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

/// In-memory storage backend.
#[derive(Debug, Default)]
pub struct MemStore {
    users: HashMap<u64, User>,
    companions: HashMap<u64, Companion>,
    conversations: HashMap<u64, Conversation>,
    user_ids: IdSequence,
    companion_ids: IdSequence,
    conversation_ids: IdSequence,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Users ─────────────────────────────────────────────────────────────

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username == username)
    }

    pub fn create_user(&mut self, username: impl Into<String>) -> User {
        let user = User {
            id: self.user_ids.next(),
            username: username.into(),
        };
        self.users.insert(user.id, user.clone());
        user
    }

    // ── Companions ────────────────────────────────────────────────────────

    pub fn companion(&self, id: u64) -> Option<&Companion> {
        self.companions.get(&id)
    }

    pub fn companions_by_user(&self, user_id: u64) -> Vec<&Companion> {
        self.companions
            .values()
            .filter(|companion| companion.user_id == Some(user_id))
            .collect()
    }

    pub fn create_companion(&mut self, new: NewCompanion) -> Companion {
        let companion = Companion {
            id: self.companion_ids.next(),
            user_id: new.user_id,
            name: new.name,
            description: new.description,
            avatar_url: new.avatar_url,
            original_photo_url: new.original_photo_url,
            personality: new.personality.unwrap_or_else(|| "balanced".into()),
            voice_type: new.voice_type.unwrap_or_else(|| "natural".into()),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        self.companions.insert(companion.id, companion.clone());
        companion
    }

    /// Merge the given fields into an existing companion and return it.
    pub fn update_companion(&mut self, id: u64, update: CompanionUpdate) -> Option<&Companion> {
        let companion = self.companions.get_mut(&id)?;
        if let Some(name) = update.name {
            companion.name = name;
        }
        if let Some(description) = update.description {
            companion.description = Some(description);
        }
        if let Some(avatar_url) = update.avatar_url {
            companion.avatar_url = Some(avatar_url);
        }
        if let Some(original_photo_url) = update.original_photo_url {
            companion.original_photo_url = Some(original_photo_url);
        }
        if let Some(personality) = update.personality {
            companion.personality = personality;
        }
        if let Some(voice_type) = update.voice_type {
            companion.voice_type = voice_type;
        }
        Some(companion)
    }

    pub fn delete_companion(&mut self, id: u64) -> bool {
        self.companions.remove(&id).is_some()
    }

    // ── Conversations ─────────────────────────────────────────────────────

    pub fn conversation(&self, id: u64) -> Option<&Conversation> {
        self.conversations.get(&id)
    }

    pub fn conversation_by_companion(&self, companion_id: u64) -> Option<&Conversation> {
        self.conversations
            .values()
            .find(|conversation| conversation.companion_id == companion_id)
    }

    pub fn create_conversation(
        &mut self,
        companion_id: u64,
        messages: Vec<Message>,
    ) -> Conversation {
        let conversation = Conversation {
            id: self.conversation_ids.next(),
            companion_id,
            messages,
            updated_at: chrono::Utc::now().to_rfc3339(),
        };
        self.conversations
            .insert(conversation.id, conversation.clone());
        conversation
    }

    /// Append messages to a conversation's current history and bump its
    /// timestamp. Unlike [`update_conversation`](Self::update_conversation)
    /// this cannot lose writes that landed after the caller's snapshot.
    pub fn append_messages(
        &mut self,
        id: u64,
        messages: Vec<Message>,
    ) -> Option<&Conversation> {
        let conversation = self.conversations.get_mut(&id)?;
        conversation.messages.extend(messages);
        conversation.updated_at = chrono::Utc::now().to_rfc3339();
        Some(conversation)
    }

    /// Replace a conversation's messages and bump its timestamp.
    pub fn update_conversation(
        &mut self,
        id: u64,
        messages: Vec<Message>,
    ) -> Option<&Conversation> {
        let conversation = self.conversations.get_mut(&id)?;
        conversation.messages = messages;
        conversation.updated_at = chrono::Utc::now().to_rfc3339();
        Some(conversation)
    }
}
