use dictionary_api::get_definition;

mod dictionary;
mod dictionary_api;
mod lookup;

pub use dictionary_api::DICTIONARY_API_URL;
pub use dictionary::{PartOfSpeech, Phonetic, Word, WordDefinition, WordMeaning};
pub use lookup::{project, Difficulty, LookupResult, MAX_EXAMPLES};
pub use reqwest::Url;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("{0}")]
    Fetch(reqwest::Error),
    #[error("{0}")]
    Deserialize(reqwest::Error),
    #[error(transparent)]
    NotFound(#[from] NotFoundError),
    #[error(transparent)]
    NoDefinition(#[from] NoDefinitionError),
    #[error("Enter a word to search for.")]
    EmptyQuery,
    #[error("Dictionary URL {0} cannot take a word path.")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Word \"{word}\" not found in the dictionary.")]
pub struct NotFoundError {
    word: String,
}

impl NotFoundError {
    pub(crate) fn new(word: &str) -> Self {
        Self {
            word: word.to_owned(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No valid definitions found for \"{word}\".")]
pub struct NoDefinitionError {
    word: String,
}

impl NoDefinitionError {
    pub(crate) fn new(word: &str) -> Self {
        Self {
            word: word.to_owned(),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    client: reqwest::Client,
    base_url: Url,
}

impl Dictionary {
    pub fn new() -> Self {
        let base_url = Url::parse(DICTIONARY_API_URL).expect("default dictionary url is valid");
        Self::with_base_url(base_url)
    }

    pub fn with_base_url(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Raw entries for `word`, as returned by the API.
    pub async fn get_definition(&self, word: &str) -> Result<Vec<Word>, DictionaryError> {
        get_definition(&self.client, &self.base_url, word).await
    }

    /// Looks up `word` and projects the first usable definition.
    ///
    /// The word is trimmed first; an empty word never reaches the network.
    pub async fn lookup(&self, word: &str) -> Result<LookupResult, DictionaryError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(DictionaryError::EmptyQuery);
        }
        let entries = self.get_definition(word).await?;
        project(word, &entries)
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
