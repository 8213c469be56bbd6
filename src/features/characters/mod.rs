//! # Feature: Historical Characters
//!
//! Persona definitions for AI-simulated historical figures. Each character has
//! a full persona prompt loaded from prompt/*.md files at compile time, plus
//! structured metadata (era, biography, knowledge boundaries) used when
//! composing the context sent to the model.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.0.0: Initial release with 11 curated characters

use serde::{Deserialize, Serialize};

pub mod prompt_builder;
pub mod store;

pub use prompt_builder::{ContextMessage, ContextRole, PromptBuilder, PromptContext};
pub use store::CharacterStore;

/// A fixed persona definition. Authored by content curation and immutable at
/// runtime; end users never create or edit profiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterProfile {
    /// Display name shown to users
    pub name: String,
    /// Era tag, e.g. "Athens, 399 BC"
    pub era: String,
    /// One-line biography for character listings
    pub biography: String,
    /// Full persona prompt: speaking style, beliefs, stay-in-character rules
    pub persona_instructions: String,
    /// Topics the character must not know about (knowledge cutoff)
    pub topic_restrictions: Vec<String>,
}
