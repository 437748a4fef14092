//! # Search Control
//!
//! Validates what the learner typed and turns it into a character selection.
//! Only the first code point of the trimmed input counts, and it must be a
//! CJK Unified Ideograph in U+4E00..=U+9FA5.

use std::fmt;

/// First code point accepted as a searchable character.
pub const CJK_FIRST: char = '\u{4E00}';
/// Last code point accepted as a searchable character.
pub const CJK_LAST: char = '\u{9FA5}';

/// Inline message shown when the input is rejected.
pub const NOT_CHINESE_MESSAGE: &str = "请输入一个汉字哦 ~ 🍊";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The first character of the input is outside the CJK range.
    NotChineseCharacter(char),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NotChineseCharacter(c) => {
                write!(f, "{c:?} is not a Chinese character")
            }
        }
    }
}

impl std::error::Error for SearchError {}

pub fn is_cjk(c: char) -> bool {
    (CJK_FIRST..=CJK_LAST).contains(&c)
}

/// Parse raw input. `Ok(None)` means there was nothing to search for.
pub fn parse_search(raw: &str) -> Result<Option<char>, SearchError> {
    let Some(first) = raw.trim().chars().next() else {
        return Ok(None);
    };
    if is_cjk(first) {
        Ok(Some(first))
    } else {
        Err(SearchError::NotChineseCharacter(first))
    }
}

/// The search field and its submit rule.
///
/// On success the field is normalized to exactly the selected character; on
/// failure it is cleared. Blank submissions leave it untouched.
#[derive(Debug, Default, Clone)]
pub struct SearchControl {
    pub field: String,
}

impl SearchControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self) -> Result<Option<char>, SearchError> {
        match parse_search(&self.field) {
            Ok(Some(c)) => {
                self.field = c.to_string();
                Ok(Some(c))
            }
            Ok(None) => Ok(None),
            Err(e) => {
                self.field.clear();
                Err(e)
            }
        }
    }
}
