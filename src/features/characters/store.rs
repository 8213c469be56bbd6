//! Character profile store
//!
//! Resolves character identifiers to their persona definitions. The roster is
//! embedded at compile time; there is no runtime authoring path.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use std::collections::HashMap;

use crate::core::{Error, Result};

use super::CharacterProfile;

#[derive(Debug, Clone)]
pub struct CharacterStore {
    profiles: HashMap<String, CharacterProfile>,
}

impl Default for CharacterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterStore {
    pub fn new() -> Self {
        let mut profiles = HashMap::new();

        // All persona prompts are embedded at compile time
        profiles.insert(
            "socrates".to_string(),
            CharacterProfile {
                name: "Socrates".to_string(),
                era: "Athens, 399 BC".to_string(),
                biography: "An inquisitive philosopher who leads every interlocutor toward self-examination".to_string(),
                persona_instructions: include_str!("../../../prompt/socrates.md").to_string(),
                topic_restrictions: vec![
                    "modern science".to_string(),
                    "events after 399 BC".to_string(),
                    "the internet and technology".to_string(),
                ],
            },
        );

        profiles.insert(
            "gandhi".to_string(),
            CharacterProfile {
                name: "Mahatma Gandhi".to_string(),
                era: "New Delhi, 1946".to_string(),
                biography: "A serene spiritual leader teaching nonviolence on the eve of Indian independence".to_string(),
                persona_instructions: include_str!("../../../prompt/gandhi.md").to_string(),
                topic_restrictions: vec![
                    "events after 1946".to_string(),
                    "digital technology and social media".to_string(),
                ],
            },
        );

        profiles.insert(
            "cleopatra".to_string(),
            CharacterProfile {
                name: "Cleopatra".to_string(),
                era: "Alexandria, 30 BC".to_string(),
                biography: "The last queen of Egypt, charismatic, strategic, and fluent in the art of diplomacy".to_string(),
                persona_instructions: include_str!("../../../prompt/cleopatra.md").to_string(),
                topic_restrictions: vec![
                    "the fate of the Roman Empire".to_string(),
                    "civil rights, digital technology, globalization".to_string(),
                ],
            },
        );

        profiles.insert(
            "napoleon".to_string(),
            CharacterProfile {
                name: "Napoleon Bonaparte".to_string(),
                era: "Saint Helena, 1820".to_string(),
                biography: "An exiled emperor reflecting on power, glory, and the cost of ambition".to_string(),
                persona_instructions: include_str!("../../../prompt/napoleon.md").to_string(),
                topic_restrictions: vec![
                    "events after 1820".to_string(),
                    "his own historical legacy".to_string(),
                    "the digital age".to_string(),
                ],
            },
        );

        profiles.insert(
            "da_vinci".to_string(),
            CharacterProfile {
                name: "Leonardo da Vinci".to_string(),
                era: "Amboise, 1519".to_string(),
                biography: "A Renaissance polymath enchanted by the mysteries of nature and the arts".to_string(),
                persona_instructions: include_str!("../../../prompt/da_vinci.md").to_string(),
                topic_restrictions: vec![
                    "the modern scientific method".to_string(),
                    "post-Renaissance science".to_string(),
                    "industrial and digital technology".to_string(),
                ],
            },
        );

        profiles.insert(
            "marx".to_string(),
            CharacterProfile {
                name: "Karl Marx".to_string(),
                era: "London, 1878".to_string(),
                biography: "A fiery philosopher and economist exposing the contradictions of capitalism".to_string(),
                persona_instructions: include_str!("../../../prompt/marx.md").to_string(),
                topic_restrictions: vec![
                    "the twentieth century".to_string(),
                    "communist regimes after his lifetime".to_string(),
                ],
            },
        );

        profiles.insert(
            "beauvoir".to_string(),
            CharacterProfile {
                name: "Simone de Beauvoir".to_string(),
                era: "Paris, 1950".to_string(),
                biography: "An existentialist philosopher probing identity, freedom, and oppression".to_string(),
                persona_instructions: include_str!("../../../prompt/beauvoir.md").to_string(),
                topic_restrictions: vec![
                    "contemporary feminism".to_string(),
                    "events after 1950".to_string(),
                    "postmodern terminology".to_string(),
                ],
            },
        );

        profiles.insert(
            "mlk".to_string(),
            CharacterProfile {
                name: "Martin Luther King Jr.".to_string(),
                era: "Atlanta, 1968".to_string(),
                biography: "A pastor and activist whose oratory turns injustice into a call for hope".to_string(),
                persona_instructions: include_str!("../../../prompt/mlk.md").to_string(),
                topic_restrictions: vec![
                    "events after 1968".to_string(),
                    "the internet".to_string(),
                ],
            },
        );

        profiles.insert(
            "einstein".to_string(),
            CharacterProfile {
                name: "Albert Einstein".to_string(),
                era: "Princeton, 1955".to_string(),
                biography: "A gentle physicist who explains the universe through analogy and wit".to_string(),
                persona_instructions: include_str!("../../../prompt/einstein.md").to_string(),
                topic_restrictions: vec![
                    "scientific advances after 1955".to_string(),
                    "digital technologies".to_string(),
                ],
            },
        );

        profiles.insert(
            "kahlo".to_string(),
            CharacterProfile {
                name: "Frida Kahlo".to_string(),
                era: "Mexico City, 1953".to_string(),
                biography: "A painter of visceral honesty, biting humor, and unflinching emotion".to_string(),
                persona_instructions: include_str!("../../../prompt/kahlo.md").to_string(),
                topic_restrictions: vec![
                    "art movements after the early 1950s".to_string(),
                    "modern technology".to_string(),
                ],
            },
        );

        profiles.insert(
            "lincoln".to_string(),
            CharacterProfile {
                name: "Abraham Lincoln".to_string(),
                era: "Washington, 1865".to_string(),
                biography: "The sixteenth US president, weighing duty against mercy at the close of the Civil War".to_string(),
                persona_instructions: include_str!("../../../prompt/lincoln.md").to_string(),
                topic_restrictions: vec![
                    "events after April 1865".to_string(),
                    "inventions beyond the telegraph and railroad".to_string(),
                ],
            },
        );

        CharacterStore { profiles }
    }

    /// Resolve a character identifier to its profile.
    /// Fails with NotFound for unknown identifiers.
    pub fn get_profile(&self, id: &str) -> Result<&CharacterProfile> {
        self.profiles
            .get(id)
            .ok_or_else(|| Error::character_not_found(id))
    }

    /// All characters, for listings and selection menus
    pub fn list_characters(&self) -> Vec<(&String, &CharacterProfile)> {
        let mut characters: Vec<_> = self.profiles.iter().collect();
        // HashMap iteration order is unstable; sort for predictable listings
        characters.sort_by(|a, b| a.0.cmp(b.0));
        characters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_creation() {
        let store = CharacterStore::new();
        assert!(store.get_profile("socrates").is_ok());
        assert!(store.get_profile("gandhi").is_ok());
        assert!(store.get_profile("cleopatra").is_ok());
        assert!(store.get_profile("napoleon").is_ok());
        assert!(store.get_profile("da_vinci").is_ok());
        assert!(store.get_profile("marx").is_ok());
        assert!(store.get_profile("beauvoir").is_ok());
        assert!(store.get_profile("mlk").is_ok());
        assert!(store.get_profile("einstein").is_ok());
        assert!(store.get_profile("kahlo").is_ok());
        assert!(store.get_profile("lincoln").is_ok());
    }

    #[test]
    fn test_unknown_character_is_not_found() {
        let store = CharacterStore::new();
        let err = store.get_profile("caesar").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.to_string().contains("caesar"));
    }

    #[test]
    fn test_profiles_are_complete() {
        let store = CharacterStore::new();
        for (id, profile) in store.list_characters() {
            assert!(!profile.name.is_empty(), "{id} has no name");
            assert!(!profile.era.is_empty(), "{id} has no era");
            assert!(!profile.biography.is_empty(), "{id} has no biography");
            assert!(
                profile.persona_instructions.len() > 100,
                "{id} prompt should be substantial"
            );
            assert!(
                !profile.topic_restrictions.is_empty(),
                "{id} has no knowledge boundaries"
            );
        }
    }

    #[test]
    fn test_lincoln_prompt_loaded() {
        let store = CharacterStore::new();
        let lincoln = store
            .get_profile("lincoln")
            .expect("lincoln profile should exist");

        assert!(lincoln.persona_instructions.contains("Abraham Lincoln"));
        assert!(lincoln.persona_instructions.contains("1865"));
        assert!(lincoln
            .persona_instructions
            .contains("Never say you are an AI"));
    }

    #[test]
    fn test_socrates_prompt_loaded() {
        let store = CharacterStore::new();
        let socrates = store
            .get_profile("socrates")
            .expect("socrates profile should exist");

        assert!(socrates.persona_instructions.contains("Socrates"));
        assert!(socrates.persona_instructions.contains("399 BC"));
        assert!(socrates
            .persona_instructions
            .contains("Never speak outside your own time"));
    }

    #[test]
    fn test_listing_is_sorted() {
        let store = CharacterStore::new();
        let ids: Vec<&String> = store.list_characters().into_iter().map(|(id, _)| id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
