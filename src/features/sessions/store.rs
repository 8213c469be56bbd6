//! Session persistence backends
//!
//! Simple key-based load/save of whole sessions. The store is handed to the
//! session manager explicitly; there is no module-wide singleton. The sqlite
//! schema mirrors the message table shape used in production: one row per
//! message with a position column and a role check constraint.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use dashmap::DashMap;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use log::debug;

use crate::core::Result;

use super::{ConversationSession, Message, MessageRole, SessionId};

/// Key-based read/write of session records
pub trait SessionStore: Send + Sync {
    fn load(&self, id: &SessionId) -> Result<Option<ConversationSession>>;
    fn save(&self, session: &ConversationSession) -> Result<()>;
}

/// In-memory store for local use and tests
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: DashMap<SessionId, ConversationSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<ConversationSession>> {
        Ok(self.sessions.get(id).map(|entry| entry.clone()))
    }

    fn save(&self, session: &ConversationSession) -> Result<()> {
        self.sessions.insert(session.id, session.clone());
        Ok(())
    }
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    character_id TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    last_activity INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS messages (
    session_id TEXT NOT NULL REFERENCES sessions(id) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    role TEXT NOT NULL CHECK (role IN ('user', 'character')),
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    PRIMARY KEY (session_id, position)
);

CREATE INDEX IF NOT EXISTS idx_messages_session_position
    ON messages(session_id, position);
";

/// Sqlite-backed store. Message rows are append-only; saving a session
/// re-inserts only positions not yet present.
pub struct SqliteSessionStore {
    connection: Mutex<sqlite::Connection>,
}

impl SqliteSessionStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    /// `":memory:"` works for tests.
    pub fn open(path: &str) -> Result<Self> {
        let connection = sqlite::open(path)?;
        connection.execute(SCHEMA)?;
        debug!("session database ready at {path}");
        Ok(SqliteSessionStore {
            connection: Mutex::new(connection),
        })
    }

    fn timestamp_from_millis(millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).unwrap_or_else(Utc::now)
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&self, id: &SessionId) -> Result<Option<ConversationSession>> {
        let connection = self
            .connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let session_id = id.to_string();

        let mut statement = connection.prepare(
            "SELECT user_id, character_id, created_at, last_activity
             FROM sessions WHERE id = ?",
        )?;
        statement.bind((1, session_id.as_str()))?;

        if !matches!(statement.next()?, sqlite::State::Row) {
            return Ok(None);
        }

        let user_id: String = statement.read("user_id")?;
        let character_id: String = statement.read("character_id")?;
        let created_at: i64 = statement.read("created_at")?;
        let last_activity: i64 = statement.read("last_activity")?;

        let mut messages = Vec::new();
        let mut statement = connection.prepare(
            "SELECT role, content, position, created_at
             FROM messages WHERE session_id = ? ORDER BY position ASC",
        )?;
        statement.bind((1, session_id.as_str()))?;

        while let sqlite::State::Row = statement.next()? {
            let role: String = statement.read("role")?;
            let content: String = statement.read("content")?;
            let position: i64 = statement.read("position")?;
            let message_created_at: i64 = statement.read("created_at")?;

            messages.push(Message {
                role: MessageRole::from_str(&role)?,
                content,
                position: position as u64,
                created_at: Self::timestamp_from_millis(message_created_at),
            });
        }

        Ok(Some(ConversationSession {
            id: *id,
            user_id,
            character_id,
            messages,
            created_at: Self::timestamp_from_millis(created_at),
            last_activity: Self::timestamp_from_millis(last_activity),
        }))
    }

    fn save(&self, session: &ConversationSession) -> Result<()> {
        let connection = self
            .connection
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let session_id = session.id.to_string();

        let mut statement = connection.prepare(
            "INSERT INTO sessions (id, user_id, character_id, created_at, last_activity)
             VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO UPDATE SET last_activity = excluded.last_activity",
        )?;
        statement.bind((1, session_id.as_str()))?;
        statement.bind((2, session.user_id.as_str()))?;
        statement.bind((3, session.character_id.as_str()))?;
        statement.bind((4, session.created_at.timestamp_millis()))?;
        statement.bind((5, session.last_activity.timestamp_millis()))?;
        statement.next()?;

        // INSERT OR IGNORE keeps message rows append-only: positions already
        // stored are never rewritten.
        for message in &session.messages {
            let mut statement = connection.prepare(
                "INSERT OR IGNORE INTO messages
                 (session_id, position, role, content, created_at)
                 VALUES (?, ?, ?, ?, ?)",
            )?;
            statement.bind((1, session_id.as_str()))?;
            statement.bind((2, message.position as i64))?;
            statement.bind((3, message.role.as_str()))?;
            statement.bind((4, message.content.as_str()))?;
            statement.bind((5, message.created_at.timestamp_millis()))?;
            statement.next()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> ConversationSession {
        let mut session = ConversationSession::new("user-1", "lincoln");
        session.append(MessageRole::User, "What was your view on unity?");
        session.append(MessageRole::Character, "A house divided cannot stand.");
        session
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemorySessionStore::new();
        let session = sample_session();
        store.save(&session).unwrap();

        let loaded = store.load(&session.id).unwrap().expect("session expected");
        assert_eq!(loaded.user_id, "user-1");
        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.messages[1].position, 2);
    }

    #[test]
    fn test_memory_store_missing_session() {
        let store = MemorySessionStore::new();
        assert!(store.load(&SessionId::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_sqlite_store_round_trip() {
        let store = SqliteSessionStore::open(":memory:").unwrap();
        let session = sample_session();
        store.save(&session).unwrap();

        let loaded = store.load(&session.id).unwrap().expect("session expected");
        assert_eq!(loaded.id, session.id);
        assert_eq!(loaded.character_id, "lincoln");
        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.messages[0].role, MessageRole::User);
        assert_eq!(loaded.messages[0].content, "What was your view on unity?");
        assert_eq!(loaded.messages[1].role, MessageRole::Character);
    }

    #[test]
    fn test_sqlite_store_missing_session() {
        let store = SqliteSessionStore::open(":memory:").unwrap();
        assert!(store.load(&SessionId::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_sqlite_save_is_append_only_and_idempotent() {
        let store = SqliteSessionStore::open(":memory:").unwrap();
        let mut session = sample_session();
        store.save(&session).unwrap();

        // Saving again with one more message must only add the new row
        session.append(MessageRole::User, "And on mercy?");
        store.save(&session).unwrap();
        store.save(&session).unwrap();

        let loaded = store.load(&session.id).unwrap().expect("session expected");
        assert_eq!(loaded.messages.len(), 3);
        let positions: Vec<u64> = loaded.messages.iter().map(|m| m.position).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn test_sqlite_updates_last_activity() {
        let store = SqliteSessionStore::open(":memory:").unwrap();
        let mut session = sample_session();
        store.save(&session).unwrap();

        session.append(MessageRole::User, "still there?");
        store.save(&session).unwrap();

        let loaded = store.load(&session.id).unwrap().expect("session expected");
        assert_eq!(
            loaded.last_activity.timestamp_millis(),
            session.last_activity.timestamp_millis()
        );
    }
}
