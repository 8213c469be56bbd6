//! Prompt context construction
//!
//! Builds the payload handed to the external AI provider: the character's
//! persona instructions as the leading system message, followed by the
//! ordered dialogue history. Construction is deterministic; identical
//! session state always produces an identical context.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use serde::Serialize;

use crate::features::sessions::{Message, MessageRole};

use super::CharacterProfile;

/// Role of a context message as the provider sees it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextRole {
    System,
    User,
    Character,
}

/// One entry of the provider payload. Timestamps and positions are
/// deliberately absent so the context depends only on ordered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextMessage {
    pub role: ContextRole,
    pub content: String,
}

/// The composed payload for one `complete` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptContext {
    pub messages: Vec<ContextMessage>,
}

impl PromptContext {
    /// The leading system prompt, if present
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .first()
            .filter(|m| m.role == ContextRole::System)
            .map(|m| m.content.as_str())
    }
}

/// Builder for prompt contexts
///
/// # Example
///
/// ```ignore
/// let context = PromptBuilder::new(profile)
///     .with_history(&session.messages)
///     .with_history_limit(Some(10))
///     .build();
/// ```
pub struct PromptBuilder<'a> {
    profile: &'a CharacterProfile,
    history: &'a [Message],
    history_limit: Option<usize>,
}

impl<'a> PromptBuilder<'a> {
    pub fn new(profile: &'a CharacterProfile) -> Self {
        Self {
            profile,
            history: &[],
            history_limit: None,
        }
    }

    /// Attach the session's ordered message history
    pub fn with_history(mut self, history: &'a [Message]) -> Self {
        self.history = history;
        self
    }

    /// Cap the history to the most recent `limit` messages. None sends
    /// everything.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    /// Build the final context: system prompt first, then history in order
    pub fn build(self) -> PromptContext {
        let mut messages = vec![ContextMessage {
            role: ContextRole::System,
            content: self.system_prompt(),
        }];

        let recent = match self.history_limit {
            Some(limit) if self.history.len() > limit => {
                &self.history[self.history.len() - limit..]
            }
            _ => self.history,
        };

        for msg in recent {
            messages.push(ContextMessage {
                role: match msg.role {
                    MessageRole::User => ContextRole::User,
                    MessageRole::Character => ContextRole::Character,
                },
                content: msg.content.clone(),
            });
        }

        PromptContext { messages }
    }

    /// Persona instructions plus a knowledge-boundaries suffix built from the
    /// profile's topic restrictions
    fn system_prompt(&self) -> String {
        let base = self.profile.persona_instructions.trim_end();

        if self.profile.topic_restrictions.is_empty() {
            return base.to_string();
        }

        let boundaries = self.profile.topic_restrictions.join("; ");
        format!(
            "{base}\n\n## Knowledge Boundaries\nYou have no knowledge of: {boundaries}. \
             If asked about such things, react with period-appropriate confusion."
        )
    }
}
