//! Ordered fallback chains of structural predicates.
//!
//! The reference sites change their markup between revisions, so no single
//! selector finds the content reliably. A [`Chain`] lists the known shapes in
//! priority order; [`Chain::first_match`] evaluates them one by one and stops
//! at the first predicate that yields any element.
//!
//! Chains are plain data and (de)serialize from JSON, so the shapes can be
//! updated from a rules file without touching code.
//!
//! # Example
//!
//! ```rust
//! use lingua_core::parse::Document;
//! use lingua_core::query::{Chain, Predicate, Scope};
//!
//! let doc = Document::parse(r#"<div class="Term_termContent__x1"><p>casa</p></div>"#).unwrap();
//! let chain = Chain::new(vec![
//!     Predicate::select("div[class*='term-content']"),
//!     Predicate::select("div[class*='Term_termContent']"),
//! ]);
//!
//! let found = chain.first_match(Scope::Document(&doc)).unwrap().unwrap();
//! assert_eq!(found.index, 1);
//! assert_eq!(found.nodes.len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::parse::{Document, Element};

/// Where a predicate is evaluated: the whole document or inside one element.
#[derive(Clone, Copy, Debug)]
pub enum Scope<'a> {
    Document(&'a Document),
    Element(Element<'a>),
}

impl<'a> Scope<'a> {
    fn select(&self, selector: &str) -> Result<Vec<Element<'a>>> {
        match self {
            Scope::Document(doc) => doc.select(selector),
            Scope::Element(el) => el.select(selector),
        }
    }

    fn root(&self) -> Element<'a> {
        match self {
            Scope::Document(doc) => doc.root(),
            Scope::Element(el) => *el,
        }
    }
}

/// A single structural test over the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    /// Every element matching a CSS selector.
    Select { selector: String },
    /// The `index`-th (0-based) element matching a CSS selector.
    Nth { selector: String, index: usize },
    /// For each `heading` element whose normalized, lowercased text contains
    /// `keyword`, the first following sibling with tag `sibling`.
    FollowingSibling { heading: String, keyword: String, sibling: String },
    /// Elements matching `selector` inside whatever `base` yields.
    Within { base: Box<Predicate>, selector: String },
    /// The scope itself.
    Root,
}

impl Predicate {
    pub fn select(selector: &str) -> Self {
        Predicate::Select { selector: selector.to_string() }
    }

    pub fn nth(selector: &str, index: usize) -> Self {
        Predicate::Nth { selector: selector.to_string(), index }
    }

    pub fn following_sibling(heading: &str, keyword: &str, sibling: &str) -> Self {
        Predicate::FollowingSibling {
            heading: heading.to_string(),
            keyword: keyword.to_string(),
            sibling: sibling.to_string(),
        }
    }

    pub fn within(base: Predicate, selector: &str) -> Self {
        Predicate::Within { base: Box::new(base), selector: selector.to_string() }
    }

    /// Evaluates the predicate, returning matches in document order without
    /// duplicates.
    pub fn evaluate<'a>(&self, scope: Scope<'a>) -> Result<Vec<Element<'a>>> {
        match self {
            Predicate::Select { selector } => scope.select(selector),
            Predicate::Nth { selector, index } => Ok(scope.select(selector)?.into_iter().nth(*index).into_iter().collect()),
            Predicate::FollowingSibling { heading, keyword, sibling } => {
                let keyword = keyword.to_lowercase();
                let mut found = Vec::new();
                for candidate in scope.select(heading)? {
                    if !candidate.normalized_text().to_lowercase().contains(&keyword) {
                        continue;
                    }
                    if let Some(next) = candidate
                        .following_siblings()
                        .find(|el| el.tag_name().eq_ignore_ascii_case(sibling))
                    {
                        push_unique(&mut found, next);
                    }
                }
                Ok(found)
            }
            Predicate::Within { base, selector } => {
                let mut found = Vec::new();
                for outer in base.evaluate(scope)? {
                    for inner in outer.select(selector)? {
                        push_unique(&mut found, inner);
                    }
                }
                Ok(found)
            }
            Predicate::Root => Ok(vec![scope.root()]),
        }
    }
}

fn push_unique<'a>(found: &mut Vec<Element<'a>>, el: Element<'a>) {
    if !found.contains(&el) {
        found.push(el);
    }
}

/// The winning predicate of a chain and what it matched.
#[derive(Debug, Clone)]
pub struct ChainMatch<'a> {
    /// Position of the winning predicate in the chain.
    pub index: usize,
    /// Matched elements, never empty.
    pub nodes: Vec<Element<'a>>,
}

/// An ordered list of predicates evaluated with early exit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain {
    predicates: Vec<Predicate>,
}

impl Chain {
    pub fn new(predicates: Vec<Predicate>) -> Self {
        Self { predicates }
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluates predicates in order and returns the first non-empty result.
    ///
    /// `Ok(None)` means every predicate was evaluated and none matched.
    /// Errors (invalid selectors) abort the chain.
    pub fn first_match<'a>(&self, scope: Scope<'a>) -> Result<Option<ChainMatch<'a>>> {
        for (index, predicate) in self.predicates.iter().enumerate() {
            let nodes = predicate.evaluate(scope)?;
            if nodes.is_empty() {
                tracing::debug!(index, ?predicate, "predicate rejected");
                continue;
            }

            tracing::debug!(index, matches = nodes.len(), "predicate matched");
            return Ok(Some(ChainMatch { index, nodes }));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinguaError;

    const PAGE: &str = r#"
        <div class="Term_termContent__abc">
            <p class="MuiTypography-bodyL">teaser</p>
            <p class="MuiTypography-bodyL">definizione</p>
        </div>
        <h3>Sinonimo di lento</h3>
        <span>skip</span>
        <p class="list"><a>adagio</a> <a>piano</a></p>
        <p class="list"><a>altro</a></p>
        <h3>Contrario</h3>
    "#;

    #[test]
    fn test_second_predicate_wins_after_first_rejected() {
        let doc = Document::parse(PAGE).unwrap();
        let second = Predicate::select("div[class*='Term_termContent']");
        let chain = Chain::new(vec![Predicate::select("div[class*='term-content']"), second.clone()]);

        let first_alone = chain.predicates()[0].evaluate(Scope::Document(&doc)).unwrap();
        assert!(first_alone.is_empty());

        let found = chain.first_match(Scope::Document(&doc)).unwrap().unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.nodes, second.evaluate(Scope::Document(&doc)).unwrap());
    }

    #[test]
    fn test_first_predicate_short_circuits() {
        let doc = Document::parse(PAGE).unwrap();
        let chain = Chain::new(vec![Predicate::select("h3"), Predicate::select("[[broken")]);

        let found = chain.first_match(Scope::Document(&doc)).unwrap().unwrap();
        assert_eq!(found.index, 0);
        assert_eq!(found.nodes.len(), 2);
    }

    #[test]
    fn test_no_match_is_none() {
        let doc = Document::parse(PAGE).unwrap();
        let chain = Chain::new(vec![Predicate::select("table"), Predicate::nth("h3", 5)]);
        assert!(chain.first_match(Scope::Document(&doc)).unwrap().is_none());
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let doc = Document::parse(PAGE).unwrap();
        let chain = Chain::new(vec![Predicate::select("[[broken")]);
        assert!(matches!(
            chain.first_match(Scope::Document(&doc)),
            Err(LinguaError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_nth_picks_by_document_order() {
        let doc = Document::parse(PAGE).unwrap();
        let nodes = Predicate::nth("p.MuiTypography-bodyL", 1)
            .evaluate(Scope::Document(&doc))
            .unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text(), "definizione");
    }

    #[test]
    fn test_following_sibling_skips_other_tags() {
        let doc = Document::parse(PAGE).unwrap();
        let nodes = Predicate::following_sibling("h3", "SINONIMO", "p")
            .evaluate(Scope::Document(&doc))
            .unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].normalized_text(), "adagio piano");
    }

    #[test]
    fn test_within_collects_descendants() {
        let doc = Document::parse(PAGE).unwrap();
        let links = Predicate::within(Predicate::following_sibling("h3", "sinonimo", "p"), "a")
            .evaluate(Scope::Document(&doc))
            .unwrap();
        let texts: Vec<String> = links.iter().map(|a| a.text()).collect();
        assert_eq!(texts, vec!["adagio", "piano"]);
    }

    #[test]
    fn test_root_in_element_scope_is_the_element() {
        let doc = Document::parse(PAGE).unwrap();
        let div = doc.select("div").unwrap()[0];
        let nodes = Predicate::Root.evaluate(Scope::Element(div)).unwrap();
        assert_eq!(nodes, vec![div]);
    }

    #[test]
    fn test_chain_json_roundtrip_shape() {
        let json = r#"[
            {"kind": "select", "selector": "div.a"},
            {"kind": "within", "base": {"kind": "nth", "selector": "p", "index": 1}, "selector": "a"},
            {"kind": "root"}
        ]"#;
        let chain: Chain = serde_json::from_str(json).unwrap();
        assert_eq!(chain.predicates().len(), 3);
        assert_eq!(chain.predicates()[2], Predicate::Root);
    }
}
