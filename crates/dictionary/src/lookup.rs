use std::fmt;

use crate::dictionary::{PartOfSpeech, Word};
use crate::{DictionaryError, NoDefinitionError};

/// Upper bound on the example sentences kept per result.
pub const MAX_EXAMPLES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// Every lookup is classified with this value. There is no frequency
    /// source to derive a real classification from.
    pub const ASSIGNED: Difficulty = Difficulty::Intermediate;

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first usable sense of a word, flattened for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupResult {
    pub word: String,
    pub meaning: String,
    pub part_of_speech: PartOfSpeech,
    pub pronunciation: String,
    pub difficulty: Difficulty,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
    pub examples: Vec<String>,
}

/// Projects the API entries for `word` into a [`LookupResult`].
///
/// Only the first entry is considered. Within it the first meaning with at
/// least one definition is selected; its first definition becomes the
/// meaning and the examples of all of its definitions are collected.
pub fn project(word: &str, entries: &[Word]) -> Result<LookupResult, DictionaryError> {
    let no_definition = || DictionaryError::NoDefinition(NoDefinitionError::new(word));
    let entry = entries.first().ok_or_else(no_definition)?;
    let meaning = entry
        .meanings
        .iter()
        .find(|meaning| !meaning.definitions.is_empty())
        .ok_or_else(no_definition)?;
    let first = &meaning.definitions[0];

    let examples = meaning
        .definitions
        .iter()
        .filter_map(|definition| definition.example.as_deref())
        .filter(|example| !example.is_empty())
        .take(MAX_EXAMPLES)
        .map(str::to_owned)
        .collect();

    Ok(LookupResult {
        word: word.to_owned(),
        meaning: first.definition.clone(),
        part_of_speech: meaning.part_of_speech.clone(),
        pronunciation: pronunciation(entry),
        difficulty: Difficulty::ASSIGNED,
        synonyms: meaning.synonyms.clone(),
        antonyms: meaning.antonyms.clone(),
        examples,
    })
}

fn pronunciation(entry: &Word) -> String {
    entry
        .phonetics
        .iter()
        .filter_map(|phonetic| phonetic.text.as_deref())
        .chain(entry.phonetic.as_deref())
        .find(|text| !text.is_empty())
        .unwrap_or_default()
        .to_owned()
}
