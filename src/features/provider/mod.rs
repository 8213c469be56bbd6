//! # Feature: AI Provider
//!
//! The single logical operation this core needs from the outside world:
//! `complete(prompt context) -> text`. Failures (timeout, rate limit,
//! malformed response) surface as `Error::Provider` and are never retried
//! here; retry policy belongs to the caller's integration layer.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use async_trait::async_trait;
use log::debug;
use openai::chat::{ChatCompletion, ChatCompletionMessage, ChatCompletionMessageRole};

use crate::core::{Error, Result};
use crate::features::characters::{ContextMessage, ContextRole, PromptContext};

/// The external language-model service, seen as one opaque call
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, context: &PromptContext) -> Result<String>;
}

/// Provider backed by an OpenAI-compatible chat-completions endpoint.
/// Credentials come from the environment (`OPENAI_API_KEY`/`OPENAI_KEY`),
/// which the binary populates from config at startup.
pub struct OpenAiProvider {
    model: String,
}

impl OpenAiProvider {
    pub fn new(model: impl Into<String>) -> Self {
        OpenAiProvider {
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_chat_message(message: &ContextMessage) -> ChatCompletionMessage {
        ChatCompletionMessage {
            role: match message.role {
                ContextRole::System => ChatCompletionMessageRole::System,
                ContextRole::User => ChatCompletionMessageRole::User,
                // The character speaks in the assistant slot
                ContextRole::Character => ChatCompletionMessageRole::Assistant,
            },
            content: Some(message.content.clone()),
            name: None,
            function_call: None,
            tool_call_id: None,
            tool_calls: None,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, context: &PromptContext) -> Result<String> {
        debug!(
            "requesting completion | model: {} | context messages: {}",
            self.model,
            context.messages.len()
        );

        let messages: Vec<ChatCompletionMessage> =
            context.messages.iter().map(Self::to_chat_message).collect();

        let completion = ChatCompletion::builder(&self.model, messages)
            .create()
            .await
            .map_err(|e| Error::Provider(e.to_string()))?;

        completion
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| Error::Provider("empty response from model".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mapping() {
        let system = OpenAiProvider::to_chat_message(&ContextMessage {
            role: ContextRole::System,
            content: "You are Socrates.".to_string(),
        });
        assert!(matches!(system.role, ChatCompletionMessageRole::System));
        assert_eq!(system.content.as_deref(), Some("You are Socrates."));

        let user = OpenAiProvider::to_chat_message(&ContextMessage {
            role: ContextRole::User,
            content: "What is virtue?".to_string(),
        });
        assert!(matches!(user.role, ChatCompletionMessageRole::User));

        let character = OpenAiProvider::to_chat_message(&ContextMessage {
            role: ContextRole::Character,
            content: "Tell me first what you believe it is.".to_string(),
        });
        assert!(matches!(
            character.role,
            ChatCompletionMessageRole::Assistant
        ));
    }

    #[test]
    fn test_model_is_kept() {
        let provider = OpenAiProvider::new("gemini-2.5-flash");
        assert_eq!(provider.model(), "gemini-2.5-flash");
    }
}
