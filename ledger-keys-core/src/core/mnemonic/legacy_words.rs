//! Word list of the pre-BIP-39 22-word phrases
//!
//! The list is not bundled with the crate. Wallets that still need to recover
//! legacy phrases load it and hand it to [`Mnemonic::from_words_with_legacy`].
//!
//! [`Mnemonic::from_words_with_legacy`]: super::Mnemonic::from_words_with_legacy

use std::collections::HashMap;
use std::fmt;

use crate::shared::constants::LEGACY_WORD_COUNT;
use crate::shared::error::KeyError;
use crate::shared::KeyResult;

/// 1600 unique lower-case words, in order
#[derive(Clone)]
pub struct LegacyWordList {
    words: Vec<String>,
    positions: HashMap<String, u16>,
}

impl LegacyWordList {
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> KeyResult<Self> {
        if words.len() != LEGACY_WORD_COUNT {
            return Err(KeyError::config(format!(
                "legacy word list must contain {} words, got {}",
                LEGACY_WORD_COUNT,
                words.len()
            )));
        }

        let mut list = Vec::with_capacity(LEGACY_WORD_COUNT);
        let mut positions = HashMap::with_capacity(LEGACY_WORD_COUNT);
        for (index, word) in words.iter().enumerate() {
            let word = word.as_ref().trim().to_lowercase();
            if word.is_empty() {
                return Err(KeyError::config(format!("legacy word {} is empty", index)));
            }
            if positions.insert(word.clone(), index as u16).is_some() {
                return Err(KeyError::config(format!("duplicate legacy word: {}", word)));
            }
            list.push(word);
        }

        log::debug!("Loaded legacy word list with {} entries", list.len());
        Ok(Self { words: list, positions })
    }

    /// One word per line; blank lines are skipped
    pub fn from_text(text: &str) -> KeyResult<Self> {
        let words: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_words(&words)
    }

    /// Case-insensitive lookup
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.positions.get(&word.to_lowercase()).copied()
    }

    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(usize::from(index)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Debug for LegacyWordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyWordList").field("len", &self.words.len()).finish()
    }
}

/// Deterministic stand-in list for tests: `w0000` .. `w1599`
#[cfg(test)]
pub(crate) fn synthetic_list() -> LegacyWordList {
    let words: Vec<String> = (0..LEGACY_WORD_COUNT).map(|i| format!("w{:04}", i)).collect();
    match LegacyWordList::from_words(&words) {
        Ok(list) => list,
        Err(err) => panic!("synthetic legacy list rejected: {}", err),
    }
}
