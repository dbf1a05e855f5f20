//! Extraction rules: every selector, token and index the locator and the
//! synonym extractor rely on.
//!
//! The defaults describe the markup observed on the live sites. When a site
//! ships a new layout, the rules can be overridden from a JSON file instead
//! of changing code. Missing keys keep their defaults.
//!
//! ```json
//! {
//!   "backlink_id": "link2",
//!   "term_container": [
//!     { "kind": "select", "selector": "div[class*='term-content']" },
//!     { "kind": "select", "selector": "div[class*='TermNew_content']" }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::query::{Chain, Predicate};
use crate::strip::BACKLINK_ID;
use crate::{LinguaError, Result};

/// Paragraphs carrying the body-text typography tokens.
pub const BODY_TEXT_PARAGRAPH: &str = "p[class*='MuiTypography-root'][class*='MuiTypography-bodyL']";

/// Class signature of the synonym page's main panel.
pub const SYNONYM_PANEL: &str = "div[class*='bg-[#EFF2F1]']";

/// Index of the real definition among body-text paragraphs when no container
/// is found; the first one is a teaser.
pub const TEASER_SKIP: usize = 1;

/// Selectors and fallback chains used during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionRules {
    /// Container of a dictionary or encyclopedia entry.
    pub term_container: Chain,
    /// Entry paragraphs, searched inside the container. A teaser paragraph
    /// is skipped only because it sits outside the wrapper tokens of the
    /// first predicate; when nothing is wrapped, every body paragraph in the
    /// container is kept, teaser included.
    pub term_paragraphs: Chain,
    /// Document-wide fallback for dictionary pages without a known container.
    pub dictionary_fallback: Chain,
    /// Container of a synonym page. Should end with [`Predicate::Root`].
    pub synonym_container: Chain,
    pub synonyms: Chain,
    pub antonyms: Chain,
    pub see_also: Chain,
    /// `id` of the links that mark internal back-references.
    pub backlink_id: String,
}

impl Default for ExtractionRules {
    fn default() -> Self {
        let wrapped_paragraphs = ["term-paragraph", "Term_elTermParagraph", "paywall"]
            .iter()
            .map(|token| format!("div[class*='{token}'] {BODY_TEXT_PARAGRAPH}"))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            term_container: Chain::new(vec![
                Predicate::select("div[class*='term-content']"),
                Predicate::select("div[class*='Term_termContent']"),
            ]),
            term_paragraphs: Chain::new(vec![
                Predicate::select(&wrapped_paragraphs),
                Predicate::select(BODY_TEXT_PARAGRAPH),
            ]),
            dictionary_fallback: Chain::new(vec![Predicate::nth(BODY_TEXT_PARAGRAPH, TEASER_SKIP)]),
            synonym_container: Chain::new(vec![
                Predicate::select(SYNONYM_PANEL),
                Predicate::select("div[class*='contenuto']"),
                Predicate::Root,
            ]),
            synonyms: Chain::new(vec![
                Predicate::within(Predicate::following_sibling("h3", "sinonimo", "p"), "a"),
                Predicate::select("p[class*='sinonimi'] a"),
                Predicate::select(&format!("{SYNONYM_PANEL} p a")),
            ]),
            antonyms: Chain::new(vec![
                Predicate::within(Predicate::following_sibling("h3", "contrario", "p"), "a"),
                Predicate::select("p[class*='contrari'] a"),
            ]),
            see_also: Chain::new(vec![
                Predicate::within(Predicate::following_sibling("h4", "vedi", "p"), "a"),
                Predicate::select("p[class*='vedianche'] a"),
            ]),
            backlink_id: BACKLINK_ID.to_string(),
        }
    }
}

impl ExtractionRules {
    /// Parses rules from JSON; absent keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| LinguaError::ConfigError(format!("Invalid rules: {}", e)))
    }

    /// Loads rules from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LinguaError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| LinguaError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// `<config dir>/lingua/rules.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("lingua").join("rules.json"))
    }

    /// Loads rules from `path` when given, otherwise from [`Self::default_path`]
    /// when that file exists, otherwise returns the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(default) if default.exists() => {
                tracing::debug!(path = %default.display(), "loading extraction rules");
                Self::from_file(&default)
            }
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_cover_every_chain() {
        let rules = ExtractionRules::default();
        assert_eq!(rules.term_container.predicates().len(), 2);
        assert_eq!(rules.term_paragraphs.predicates().len(), 2);
        assert_eq!(rules.synonym_container.predicates().last(), Some(&Predicate::Root));
        assert!(!rules.synonyms.is_empty());
        assert!(!rules.antonyms.is_empty());
        assert!(!rules.see_also.is_empty());
        assert_eq!(rules.backlink_id, "link2");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let rules = ExtractionRules::from_json_str(r#"{"backlink_id": "back"}"#).unwrap();
        assert_eq!(rules.backlink_id, "back");
        assert_eq!(rules.term_container, ExtractionRules::default().term_container);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let result = ExtractionRules::from_json_str("{not json");
        assert!(matches!(result, Err(LinguaError::ConfigError(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"dictionary_fallback": [{{"kind": "nth", "selector": "p", "index": 2}}]}}"#
        )
        .unwrap();

        let rules = ExtractionRules::from_file(file.path()).unwrap();
        assert_eq!(rules.dictionary_fallback.predicates(), &[Predicate::nth("p", 2)]);
    }

    #[test]
    fn test_missing_file() {
        let result = ExtractionRules::load(Some(Path::new("/nonexistent/rules.json")));
        assert!(matches!(result, Err(LinguaError::FileNotFound(_))));
    }

    #[test]
    fn test_default_selectors_parse() {
        let doc = crate::Document::parse("<p>x</p>").unwrap();
        let rules = ExtractionRules::default();
        for chain in [
            &rules.term_container,
            &rules.term_paragraphs,
            &rules.dictionary_fallback,
            &rules.synonym_container,
            &rules.synonyms,
            &rules.antonyms,
            &rules.see_also,
        ] {
            assert!(chain.first_match(crate::query::Scope::Document(&doc)).is_ok());
        }
    }
}
