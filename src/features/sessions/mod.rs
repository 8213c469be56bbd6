//! # Feature: Conversation Sessions
//!
//! Per-user, per-character dialogue state. A session owns an append-only,
//! gapless message sequence and is the unit of serialization: concurrent
//! appends against the same session are funneled through a per-session lock
//! so positions stay strictly increasing.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with in-memory and sqlite-backed stores

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::core::Error;

pub mod manager;
pub mod store;

pub use manager::SessionManager;
pub use store::{MemorySessionStore, SessionStore, SqliteSessionStore};

pub type SessionId = Uuid;

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Character,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Character => "character",
        }
    }
}

impl FromStr for MessageRole {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "user" => Ok(MessageRole::User),
            "character" => Ok(MessageRole::Character),
            other => Err(Error::Validation(format!("unknown message role '{other}'"))),
        }
    }
}

/// One dialogue turn. Append-only: once written, never mutated or reordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    /// 1-based sequence position, strictly increasing and gapless within a
    /// session
    pub position: u64,
    pub created_at: DateTime<Utc>,
}

/// The ongoing dialogue between one user and one character. A user may hold
/// many concurrent sessions; each session references exactly one character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSession {
    pub id: SessionId,
    pub user_id: String,
    pub character_id: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
}

impl ConversationSession {
    pub fn new(user_id: &str, character_id: &str) -> Self {
        let now = Utc::now();
        ConversationSession {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            character_id: character_id.to_string(),
            messages: Vec::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// The position the next appended message will receive
    pub fn next_position(&self) -> u64 {
        self.messages.len() as u64 + 1
    }

    /// Append a message at the next position and bump last_activity.
    /// Callers must hold the session's lock when the session is shared.
    pub fn append(&mut self, role: MessageRole, content: &str) -> Message {
        let message = Message {
            role,
            content: content.to_string(),
            position: self.next_position(),
            created_at: Utc::now(),
        };
        self.messages.push(message.clone());
        self.last_activity = message.created_at;
        message
    }
}
