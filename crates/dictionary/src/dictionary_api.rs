// https://dictionaryapi.dev/ - free, no key, english entries only

use reqwest::{StatusCode, Url};

use crate::{DictionaryError, NotFoundError, Word};

pub const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

pub(crate) async fn get_definition(
    client: &reqwest::Client,
    base_url: &Url,
    word: &str,
) -> Result<Vec<Word>, DictionaryError> {
    let url = entry_url(base_url, word)?;
    tracing::debug!(%url, "requesting dictionary entry");
    let res: reqwest::Response = client.get(url).send().await.map_err(DictionaryError::Fetch)?;
    let status = res.status();
    if !status.is_success() {
        if status != StatusCode::NOT_FOUND {
            tracing::warn!(%status, word, "dictionary api returned an error status");
        }
        return Err(DictionaryError::NotFound(NotFoundError::new(word)));
    }
    res.json::<Vec<Word>>()
        .await
        .map_err(DictionaryError::Deserialize)
}

fn entry_url(base_url: &Url, word: &str) -> Result<Url, DictionaryError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|_| DictionaryError::InvalidBaseUrl(base_url.to_string()))?
        .pop_if_empty()
        .push(word);
    Ok(url)
}
