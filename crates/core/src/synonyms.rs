//! Synonym, antonym and cross-reference extraction.
//!
//! The structured path reads link texts out of the synonym panel using one
//! fallback chain per group. Pages where none of the chains yields anything
//! go through the text path instead: the panel is rendered and split on the
//! section phrases the site prints between the lists.

use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;

use crate::Result;
use crate::locate::locate_synonym_container;
use crate::parse::{Document, Element};
use crate::query::{Chain, Scope};
use crate::render::{decode_entities, render};
use crate::rules::ExtractionRules;
use crate::tree::Node;

/// Separator the text path splits on.
const SEPARATOR: &str = ", ";

/// Which list a group of words belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLabel {
    Synonyms,
    Antonyms,
    SeeAlso,
}

impl GroupLabel {
    /// Heading printed before the group.
    pub fn title(self) -> &'static str {
        match self {
            GroupLabel::Synonyms => "Sinonimi",
            GroupLabel::Antonyms => "Contrari",
            GroupLabel::SeeAlso => "Vedi anche",
        }
    }
}

/// A labelled list of distinct words, in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SynonymGroup {
    pub label: GroupLabel,
    pub items: Vec<String>,
}

/// First character uppercased, the rest lowercased.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

/// Trims items, drops empty ones and removes case-insensitive duplicates,
/// keeping the first occurrence and its casing.
pub fn dedupe_case_insensitive<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter_map(|item| {
            let trimmed = item.as_ref().trim();
            (!trimmed.is_empty() && seen.insert(trimmed.to_lowercase())).then(|| trimmed.to_string())
        })
        .collect()
}

fn group_items(container: Element<'_>, chain: &Chain) -> Result<Vec<String>> {
    let Some(found) = chain.first_match(Scope::Element(container))? else {
        return Ok(Vec::new());
    };

    Ok(dedupe_case_insensitive(found.nodes.iter().map(|link| decode_entities(&link.text()))))
}

/// Runs the three group chains inside `container`. Groups may be empty.
pub fn extract_groups(container: Element<'_>, rules: &ExtractionRules) -> Result<Vec<SynonymGroup>> {
    [
        (GroupLabel::Synonyms, &rules.synonyms),
        (GroupLabel::Antonyms, &rules.antonyms),
        (GroupLabel::SeeAlso, &rules.see_also),
    ]
    .into_iter()
    .map(|(label, chain)| Ok(SynonymGroup { label, items: group_items(container, chain)? }))
    .collect()
}

/// Header line with the capitalized word, then one `Label: a, b` line per
/// non-empty group. `None` when every group is empty.
pub fn format_groups(word: &str, groups: &[SynonymGroup]) -> Option<String> {
    let lines: Vec<String> = groups
        .iter()
        .filter(|group| !group.items.is_empty())
        .map(|group| format!("{}: {}", group.label.title(), group.items.join(SEPARATOR)))
        .collect();

    if lines.is_empty() {
        return None;
    }

    let mut out = capitalize(word);
    for line in lines {
        out.push('\n');
        out.push_str(&line);
    }
    Some(out.trim().to_string())
}

/// Splits rendered synonym text into words.
///
/// `Sinonimo di <Word>` is dropped, everything from `Contrario di <Word>` up
/// to the next `Vedi anche:` collapses into a separator, and remaining
/// `Vedi anche:` markers become separators too.
pub fn fallback_items(text: &str, word: &str) -> Result<Vec<String>> {
    let head = regex::escape(&capitalize(word));
    let synonym_of = Regex::new(&format!("Sinonimo di {head}"))?;
    let contrary_of = Regex::new(&format!("Contrario di {head}.*?Vedi anche:"))?;

    let text = synonym_of.replace_all(text, "");
    let text = contrary_of.replace_all(&text, SEPARATOR);
    let text = text.replace("Vedi anche:", SEPARATOR);

    Ok(dedupe_case_insensitive(text.split(SEPARATOR)))
}

/// Extracts the synonym listing for `word` from a sinonimi.it page.
///
/// Returns `Ok(None)` when neither path finds any word.
pub fn extract(doc: &Document, word: &str, rules: &ExtractionRules) -> Result<Option<String>> {
    let Some(container) = locate_synonym_container(doc, rules)? else {
        return Ok(None);
    };

    let groups = extract_groups(container, rules)?;
    if let Some(listing) = format_groups(word, &groups) {
        return Ok(Some(listing));
    }

    tracing::debug!("no structured synonym groups, splitting rendered text");
    let rendered = render(&Node::from_element(container)).plain_text();
    let items = fallback_items(&rendered, word)?;
    if items.is_empty() {
        return Ok(None);
    }

    Ok(Some(format!("{}:\n{}", capitalize(word), items.join(SEPARATOR))))
}
