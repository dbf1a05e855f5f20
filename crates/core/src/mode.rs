use std::fmt;

use serde::Serialize;
use url::Url;

use crate::{LinguaError, Result};

/// Which reference work to consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Treccani vocabulary.
    #[default]
    Dictionary,
    /// Treccani encyclopedia.
    Encyclopedia,
    /// sinonimi.it listing.
    Synonym,
}

impl Mode {
    /// Builds the page URL for `word`. Inner spaces become dashes, as the
    /// sites expect for multi-word entries.
    ///
    /// The dashed word is appended as a single percent-encoded path segment,
    /// so `/`, `?` and `#` inside it stay part of the entry name.
    pub fn url_for(self, word: &str) -> Result<Url> {
        let slug = word.trim().replace(' ', "-");
        if slug.is_empty() || slug == "." || slug == ".." {
            return Err(LinguaError::MalformedInput(format!("'{}' is not a word", word.trim())));
        }

        let base = match self {
            Mode::Dictionary => "https://www.treccani.it/vocabolario",
            Mode::Encyclopedia => "https://www.treccani.it/enciclopedia",
            Mode::Synonym => "https://sinonimi.it",
        };

        let mut url = Url::parse(base).map_err(|e| LinguaError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LinguaError::InvalidUrl(format!("{} cannot take a path", base)))?
            .push(&slug);
        Ok(url)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Dictionary => "vocabolario",
            Mode::Encyclopedia => "enciclopedia",
            Mode::Synonym => "sinonimi",
        };
        f.write_str(name)
    }
}
