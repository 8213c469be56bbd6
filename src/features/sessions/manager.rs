//! Session manager
//!
//! Owns the dialogue state machine: create a session, append turns, and
//! assemble the prompt context for the external provider. Appends take a
//! per-session lock across the load/append/save cycle so the position
//! sequence stays gapless under concurrent requests.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use dashmap::DashMap;
use log::debug;
use std::sync::{Arc, Mutex, PoisonError};

use crate::core::{Error, Result};
use crate::features::characters::{CharacterStore, PromptBuilder, PromptContext};

use super::{ConversationSession, Message, MessageRole, SessionId, SessionStore};

pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    characters: Arc<CharacterStore>,
    /// Per-session mutual exclusion; the only concurrency scope in this core
    locks: DashMap<SessionId, Arc<Mutex<()>>>,
    history_limit: Option<usize>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn SessionStore>, characters: Arc<CharacterStore>) -> Self {
        SessionManager {
            store,
            characters,
            locks: DashMap::new(),
            history_limit: None,
        }
    }

    /// Cap how many recent messages feed the prompt context. None (the
    /// default) sends the full history.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    /// Create a new empty session for a user and character.
    /// Fails with NotFound if the character is unknown.
    pub fn create_session(
        &self,
        user_id: &str,
        character_id: &str,
    ) -> Result<ConversationSession> {
        // The character reference must resolve for the session's entire
        // lifetime; profiles are immutable, so checking at creation suffices.
        self.characters.get_profile(character_id)?;

        let session = ConversationSession::new(user_id, character_id);
        self.store.save(&session)?;
        debug!(
            "created session {} | user: {} | character: {}",
            session.id, user_id, character_id
        );
        Ok(session)
    }

    /// Append a user turn. Fails with NotFound for unknown sessions and
    /// Validation for empty text; neither failure writes a message.
    pub fn append_user_message(&self, session_id: &SessionId, text: &str) -> Result<Message> {
        self.append(session_id, MessageRole::User, text)
    }

    /// Append the character's reply once the provider response is in
    pub fn append_character_reply(&self, session_id: &SessionId, text: &str) -> Result<Message> {
        self.append(session_id, MessageRole::Character, text)
    }

    /// Deterministically assemble the provider payload: persona instructions
    /// first, then the ordered message history
    pub fn build_prompt_context(&self, session_id: &SessionId) -> Result<PromptContext> {
        let session = self.get_session(session_id)?;
        let profile = self.characters.get_profile(&session.character_id)?;

        Ok(PromptBuilder::new(profile)
            .with_history(&session.messages)
            .with_history_limit(self.history_limit)
            .build())
    }

    /// Load a session. Fails with NotFound if the id is unknown.
    pub fn get_session(&self, session_id: &SessionId) -> Result<ConversationSession> {
        self.store
            .load(session_id)?
            .ok_or_else(|| Error::session_not_found(session_id))
    }

    fn append(&self, session_id: &SessionId, role: MessageRole, text: &str) -> Result<Message> {
        if text.trim().is_empty() {
            return Err(Error::Validation("message text is empty".to_string()));
        }

        let lock = self.session_lock(session_id);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut session = self
            .store
            .load(session_id)?
            .ok_or_else(|| Error::session_not_found(session_id))?;
        let message = session.append(role, text);
        self.store.save(&session)?;

        debug!(
            "appended {} message at position {} | session: {}",
            role.as_str(),
            message.position,
            session_id
        );
        Ok(message)
    }

    fn session_lock(&self, session_id: &SessionId) -> Arc<Mutex<()>> {
        self.locks.entry(*session_id).or_default().clone()
    }
}
