// Core layer - configuration and error handling
pub mod core;

// Features layer - all feature modules
pub mod features;

// Re-export core items
pub use core::{Config, Error, Result};

// Re-export feature items
pub use features::{
    // Characters
    CharacterProfile, CharacterStore, PromptBuilder, PromptContext,
    // Chat orchestration
    ChatService,
    // Provider
    CompletionProvider, OpenAiProvider,
    // Sessions
    ConversationSession, MemorySessionStore, Message, MessageRole, SessionId, SessionManager,
    SessionStore, SqliteSessionStore,
};
