//! Content location per retrieval mode.
//!
//! Each mode walks the fallback chains from [`ExtractionRules`] in a fixed
//! order. Finding nothing is a normal outcome and yields `Ok(None)`.

use crate::Result;
use crate::mode::Mode;
use crate::parse::{Document, Element};
use crate::query::Scope;
use crate::rules::ExtractionRules;

/// What the locator found: one container, or an ordered run of paragraphs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Located<'a> {
    Node(Element<'a>),
    Nodes(Vec<Element<'a>>),
}

impl<'a> Located<'a> {
    pub fn into_nodes(self) -> Vec<Element<'a>> {
        match self {
            Located::Node(node) => vec![node],
            Located::Nodes(nodes) => nodes,
        }
    }
}

/// Finds the content node(s) for `mode`.
///
/// - Dictionary / Encyclopedia: the entry container, then the entry
///   paragraphs inside it. Dictionary pages without a known container fall
///   back to a document-wide paragraph pick.
/// - Synonym: the synonym panel, degrading to the document root.
pub fn locate<'a>(doc: &'a Document, mode: Mode, rules: &ExtractionRules) -> Result<Option<Located<'a>>> {
    match mode {
        Mode::Synonym => Ok(locate_synonym_container(doc, rules)?.map(Located::Node)),
        Mode::Dictionary | Mode::Encyclopedia => {
            if let Some(container) = locate_term_container(doc, rules)? {
                return Ok(locate_paragraphs(container, rules)?.map(Located::Nodes));
            }

            if mode != Mode::Dictionary {
                tracing::debug!(%mode, "no entry container");
                return Ok(None);
            }

            tracing::debug!("no entry container, trying document-wide paragraph fallback");
            let found = rules.dictionary_fallback.first_match(Scope::Document(doc))?;
            Ok(found.and_then(|m| m.nodes.into_iter().next()).map(Located::Node))
        }
    }
}

/// First element matched by the term container chain.
pub fn locate_term_container<'a>(doc: &'a Document, rules: &ExtractionRules) -> Result<Option<Element<'a>>> {
    let found = rules.term_container.first_match(Scope::Document(doc))?;
    Ok(found.and_then(|m| m.nodes.into_iter().next()))
}

/// Entry paragraphs inside `container`, never outside it.
pub fn locate_paragraphs<'a>(container: Element<'a>, rules: &ExtractionRules) -> Result<Option<Vec<Element<'a>>>> {
    Ok(rules.term_paragraphs.first_match(Scope::Element(container))?.map(|m| m.nodes))
}

/// The synonym panel, or whatever later links of the chain yield.
pub fn locate_synonym_container<'a>(doc: &'a Document, rules: &ExtractionRules) -> Result<Option<Element<'a>>> {
    let found = rules.synonym_container.first_match(Scope::Document(doc))?;
    Ok(found.and_then(|m| m.nodes.into_iter().next()))
}
