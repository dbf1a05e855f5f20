//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types that wrap
//! `scraper`'s tree. Everything the locator and extractor need to ask of a
//! page (CSS selection, attributes, text, sibling order) goes through here.
//!
//! # Example
//!
//! ```rust
//! use lingua_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div class="term-content">
//!                 <p class="MuiTypography-root MuiTypography-bodyL">casa</p>
//!             </div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let paragraphs = doc.select("div[class*='term-content'] p").unwrap();
//! assert_eq!(paragraphs.len(), 1);
//! ```

use scraper::{ElementRef, Html, Selector};

use crate::{LinguaError, Result};

/// Compiles a CSS selector, reporting failures as [`LinguaError::InvalidSelector`].
pub(crate) fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| LinguaError::InvalidSelector { selector: selector.to_string(), reason: e.to_string() })
}

/// Represents a parsed HTML document.
///
/// The document is read-only: noise stripping works on owned copies of the
/// located subtrees (see [`crate::tree::Node`]), never on the document itself.
///
/// # Example
///
/// ```rust
/// use lingua_core::parse::Document;
///
/// let html = "<html><head><title>casa - Treccani</title></head><body><p>Hello</p></body></html>";
/// let doc = Document::parse(html).unwrap();
/// assert_eq!(doc.title(), Some("casa - Treccani".to_string()));
/// ```
#[derive(Debug)]
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::MalformedInput`] when the input holds no markup
    /// at all; anything else is accepted, since html5ever recovers from
    /// malformed markup.
    pub fn parse(html: &str) -> Result<Self> {
        if html.trim().is_empty() {
            return Err(LinguaError::MalformedInput("document is empty".to_string()));
        }

        let html = Html::parse_document(html);
        Ok(Self { html })
    }

    /// The `<html>` element, used as the degraded search scope.
    pub fn root(&self) -> Element<'_> {
        Element { element: self.html.root_element() }
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::InvalidSelector`] if the selector is invalid.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lingua_core::parse::Document;
    ///
    /// let html = r#"<p class="content">First</p><p class="content">Second</p>"#;
    /// let doc = Document::parse(html).unwrap();
    /// let elements = doc.select("p.content").unwrap();
    /// assert_eq!(elements.len(), 2);
    /// ```
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel = compile_selector(selector)?;
        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Gets the title of the document.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A borrowed handle on an element of a [`Document`].
///
/// Two handles compare equal when they point at the same node of the same
/// document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    element: ElementRef<'a>,
}

impl<'a> Element<'a> {
    pub(crate) fn element_ref(&self) -> ElementRef<'a> {
        self.element
    }

    /// Gets the text content of this element.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Text content with runs of whitespace collapsed to single spaces and
    /// the ends trimmed.
    pub fn normalized_text(&self) -> String {
        self.text().split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector.
    ///
    /// Only descendants are searched; the element itself is never part of
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns [`LinguaError::InvalidSelector`] if the selector is invalid.
    pub fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        let sel = compile_selector(selector)?;
        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Sibling elements after this one, in document order.
    pub fn following_siblings(&self) -> impl Iterator<Item = Element<'a>> + use<'a> {
        self.element
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .map(|el| Element { element: el })
    }
}
