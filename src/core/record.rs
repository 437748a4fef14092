//! # Data Model
//!
//! The plain values that flow between components:
//!
//! ```text
//! CharacterRecord   // dictionary entry shown by the info panel
//! DisplayMode       // Watch | Practice
//! SelectionState    // selected character + mode + loading flag
//! ```

use serde::{Deserialize, Serialize};

/// A dictionary entry for one character. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub character: char,
    pub pinyin: String,
    pub definition: String,
    pub example_sentence: String,
    pub example_translation: String,
}

impl CharacterRecord {
    pub fn new(
        character: char,
        pinyin: &str,
        definition: &str,
        example_sentence: &str,
        example_translation: &str,
    ) -> Self {
        Self {
            character,
            pinyin: pinyin.to_string(),
            definition: definition.to_string(),
            example_sentence: example_sentence.to_string(),
            example_translation: example_translation.to_string(),
        }
    }
}

/// What the writing board is doing with the current character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Demonstrate the stroke order.
    #[default]
    Watch,
    /// Let the learner write the character.
    Practice,
}

impl DisplayMode {
    pub fn label(&self) -> &'static str {
        match self {
            DisplayMode::Watch => "演示中",
            DisplayMode::Practice => "练习中",
        }
    }
}

/// Process-wide selection state, owned by `App`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionState {
    pub selected_character: char,
    pub mode: DisplayMode,
    /// Short-lived UI flag. Not a correctness signal.
    pub is_loading: bool,
}

impl SelectionState {
    pub fn new(selected_character: char) -> Self {
        Self {
            selected_character,
            mode: DisplayMode::Watch,
            is_loading: false,
        }
    }
}
