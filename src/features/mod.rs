//! # Features Layer
//!
//! Each feature lives in its own module: character profiles, conversation
//! sessions, the external AI provider, and the chat orchestration that ties
//! them together.

pub mod characters;
pub mod chat;
pub mod provider;
pub mod sessions;

// Re-export the items most callers need
pub use characters::{
    CharacterProfile, CharacterStore, ContextMessage, ContextRole, PromptBuilder, PromptContext,
};
pub use chat::ChatService;
pub use provider::{CompletionProvider, OpenAiProvider};
pub use sessions::{
    ConversationSession, MemorySessionStore, Message, MessageRole, SessionId, SessionManager,
    SessionStore, SqliteSessionStore,
};
