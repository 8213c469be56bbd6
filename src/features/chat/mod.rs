//! # Feature: Chat Orchestration
//!
//! Ties the pieces together for one inbound turn: record the user message,
//! assemble the prompt context, call the provider, record the reply. The
//! user message is persisted before the provider call, so a provider failure
//! never loses what the user said.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use log::{info, warn};
use std::sync::Arc;

use crate::core::Result;
use crate::features::provider::CompletionProvider;
use crate::features::sessions::{SessionId, SessionManager};

pub struct ChatService {
    sessions: Arc<SessionManager>,
    provider: Arc<dyn CompletionProvider>,
}

impl ChatService {
    pub fn new(sessions: Arc<SessionManager>, provider: Arc<dyn CompletionProvider>) -> Self {
        ChatService { sessions, provider }
    }

    /// The session manager, for callers that create sessions or inspect
    /// history directly
    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    /// Process one user turn and return the character's reply
    pub async fn handle_message(&self, session_id: &SessionId, text: &str) -> Result<String> {
        self.sessions.append_user_message(session_id, text)?;
        let context = self.sessions.build_prompt_context(session_id)?;

        let reply = match self.provider.complete(&context).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("provider call failed | session: {session_id} | {e}");
                return Err(e);
            }
        };

        self.sessions.append_character_reply(session_id, &reply)?;
        info!(
            "completed turn | session: {} | reply: {} chars",
            session_id,
            reply.len()
        );
        Ok(reply)
    }
}
