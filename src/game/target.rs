use std::fmt;

use crate::error::TargetError;

/// Longest target word; one byte short of the line buffer.
pub const MAX_TARGET_LEN: usize = 31;

/// The word every player races to spell: uppercase `A`-`Z`, 1 to 31 letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetWord(String);

impl TargetWord {
    /// Uppercase letters, drop everything else, keep at most 31 letters.
    pub fn normalize(text: &str) -> Result<Self, TargetError> {
        let word: String = text
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .take(MAX_TARGET_LEN)
            .collect();
        if word.is_empty() {
            return Err(TargetError::NoLetters(text.to_string()));
        }
        Ok(TargetWord(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The letter at `index`, if the word is that long.
    pub fn letter(&self, index: usize) -> Option<char> {
        self.0.as_bytes().get(index).map(|&b| b as char)
    }

    /// The first `count` letters.
    pub fn prefix(&self, count: usize) -> &str {
        &self.0[..count.min(self.0.len())]
    }
}

impl fmt::Display for TargetWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
