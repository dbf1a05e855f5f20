//! Main lookup API.
//!
//! This module ties the pipeline together: locate the content for a mode,
//! strip backlink noise from an owned copy, render it, and clean the result.
//! The main entry point is the [`Lookup`] struct, along with the convenience
//! functions [`lookup`] and [`fetch_and_lookup`].
//!
//! # Example
//!
//! ```rust
//! use lingua_core::{Mode, lookup};
//!
//! let html = r#"
//!     <div class="term-content">
//!         <div class="term-paragraph">
//!             <p class="MuiTypography-root MuiTypography-bodyL"><strong>casa</strong> s. f. abitazione</p>
//!         </div>
//!     </div>
//! "#;
//!
//! let entry = lookup(html, Mode::Dictionary, "casa").unwrap().unwrap();
//! assert_eq!(entry.plain_text, "casa s. f. abitazione");
//! ```

use serde::Serialize;

use crate::locate::locate;
use crate::mode::Mode;
use crate::parse::Document;
use crate::render::render;
use crate::rules::ExtractionRules;
use crate::sanitize::sanitize;
use crate::strip::strip_backlinks;
use crate::synonyms;
use crate::tree::Node;
use crate::{LinguaError, Result};
#[cfg(feature = "fetch")]
use crate::fetch::{FetchConfig, fetch_url};

/// Configuration for a [`Lookup`].
///
/// # Example
///
/// ```rust
/// use lingua_core::LookupConfig;
///
/// let config = LookupConfig::builder()
///     .styled(false)
///     .paragraph_separator("\n")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Selectors and fallback chains (default: the observed live markup).
    pub rules: ExtractionRules,

    /// Whether [`Entry::text`] keeps ANSI emphasis escapes (default: true).
    pub styled: bool,

    /// Inserted between entry paragraphs (default: a blank line).
    pub paragraph_separator: String,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self { rules: ExtractionRules::default(), styled: true, paragraph_separator: "\n\n".to_string() }
    }
}

impl LookupConfig {
    pub fn builder() -> LookupConfigBuilder {
        LookupConfigBuilder::new()
    }
}

/// Builder for LookupConfig.
pub struct LookupConfigBuilder {
    config: LookupConfig,
}

impl LookupConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: LookupConfig::default() }
    }

    /// Sets the extraction rules.
    pub fn rules(mut self, rules: ExtractionRules) -> Self {
        self.config.rules = rules;
        self
    }

    /// Sets whether output keeps ANSI emphasis.
    pub fn styled(mut self, value: bool) -> Self {
        self.config.styled = value;
        self
    }

    /// Sets the separator placed between entry paragraphs.
    pub fn paragraph_separator(mut self, value: &str) -> Self {
        self.config.paragraph_separator = value.to_string();
        self
    }

    /// Builds the config.
    pub fn build(self) -> LookupConfig {
        self.config
    }
}

impl Default for LookupConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A found entry, ready to print.
#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// The word as requested, trimmed.
    pub word: String,

    pub mode: Mode,

    /// Page the entry came from, when known.
    pub source_url: Option<String>,

    /// Output text; styled or plain depending on [`LookupConfig::styled`].
    pub text: String,

    /// Output text without escape sequences.
    pub plain_text: String,
}

impl Entry {
    /// Gets the entry as structured JSON.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Styled and plain renderings of the same content.
struct Rendered {
    ansi: String,
    plain: String,
}

/// Main entry point for word lookups.
///
/// # Example
///
/// ```rust
/// use lingua_core::{Lookup, LookupConfig, Mode};
///
/// let lookup = Lookup::with_config(LookupConfig::builder().styled(false).build());
/// let html = r#"<div class="contenuto"><p class="sinonimi"><a>adagio</a></p></div>"#;
/// let entry = lookup.parse(html, Mode::Synonym, "lento").unwrap().unwrap();
/// assert_eq!(entry.text, "Lento\nSinonimi: adagio");
/// ```
pub struct Lookup {
    config: LookupConfig,
}

impl Lookup {
    /// Creates a new Lookup with default settings.
    pub fn new() -> Self {
        Self { config: LookupConfig::default() }
    }

    /// Creates a new Lookup with a custom configuration.
    pub fn with_config(config: LookupConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// Parses a page and extracts the entry for `word`.
    ///
    /// `Ok(None)` means the page holds no entry the rules recognize.
    ///
    /// # Errors
    ///
    /// [`LinguaError::MalformedInput`] for an empty page or word,
    /// [`LinguaError::InvalidSelector`] for broken rules.
    pub fn parse(&self, html: &str, mode: Mode, word: &str) -> Result<Option<Entry>> {
        let doc = Document::parse(html)?;
        self.extract(&doc, mode, word, None)
    }

    /// Like [`Lookup::parse`], but a missing entry is [`LinguaError::NotFound`].
    pub fn require(&self, html: &str, mode: Mode, word: &str) -> Result<Entry> {
        self.parse(html, mode, word)?
            .ok_or_else(|| LinguaError::NotFound(word.trim().to_string()))
    }

    /// Fetches the page for `word` and extracts its entry.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_parse(&self, word: &str, mode: Mode, fetch_config: &FetchConfig) -> Result<Option<Entry>> {
        let url = mode.url_for(word)?;
        let html = fetch_url(url.as_str(), fetch_config).await?;
        let doc = Document::parse(&html)?;
        self.extract(&doc, mode, word, Some(url.to_string()))
    }

    /// Extracts the entry from an already parsed document.
    pub fn extract(&self, doc: &Document, mode: Mode, word: &str, source_url: Option<String>) -> Result<Option<Entry>> {
        let word = word.trim();
        if word.is_empty() {
            return Err(LinguaError::MalformedInput("word is empty".to_string()));
        }

        let rendered = match mode {
            Mode::Synonym => synonyms::extract(doc, word, &self.config.rules)?
                .map(|listing| Rendered { ansi: listing.clone(), plain: listing }),
            Mode::Dictionary | Mode::Encyclopedia => self.render_entry(doc, mode)?,
        };

        let Some(rendered) = rendered else {
            tracing::debug!(%mode, word, "entry not found");
            return Ok(None);
        };

        let text = if self.config.styled { rendered.ansi } else { rendered.plain.clone() };
        Ok(Some(Entry { word: word.to_string(), mode, source_url, text, plain_text: rendered.plain }))
    }

    /// Dictionary and encyclopedia assembly: every located paragraph is
    /// cleaned, rendered and trimmed, then the paragraphs are joined.
    fn render_entry(&self, doc: &Document, mode: Mode) -> Result<Option<Rendered>> {
        let Some(located) = locate(doc, mode, &self.config.rules)? else {
            return Ok(None);
        };

        let mut ansi = Vec::new();
        let mut plain = Vec::new();
        for element in located.into_nodes() {
            let mut node = Node::from_element(element);
            let removed = strip_backlinks(&mut node, &self.config.rules.backlink_id);
            if removed > 0 {
                tracing::debug!(removed, "stripped backlink emphasis");
            }

            let stream = render(&node);
            ansi.push(stream.to_ansi().trim().to_string());
            plain.push(stream.plain_text().trim().to_string());
        }

        let separator = &self.config.paragraph_separator;
        let plain = sanitize(&plain.join(separator)).trim().to_string();
        if plain.is_empty() {
            return Ok(None);
        }

        Ok(Some(Rendered { ansi: sanitize(&ansi.join(separator)).trim().to_string(), plain }))
    }
}

impl Default for Lookup {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts the entry for `word` from `html` with default settings.
pub fn lookup(html: &str, mode: Mode, word: &str) -> Result<Option<Entry>> {
    Lookup::new().parse(html, mode, word)
}

/// Fetches and extracts the entry for `word` with default settings.
#[cfg(feature = "fetch")]
pub async fn fetch_and_lookup(word: &str, mode: Mode) -> Result<Option<Entry>> {
    Lookup::new().fetch_and_parse(word, mode, &FetchConfig::default()).await
}
