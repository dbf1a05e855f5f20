//! Tree-to-text rendering.
//!
//! Converts an owned [`Node`] into a [`TextStream`]. Emphasis becomes
//! bracketed style regions, paragraphs and `<br>` become line breaks,
//! footnote superscripts vanish, and every other element is transparent.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use scraper::Html;

use crate::stream::{Style, TextStream};
use crate::tree::Node;

/// Entity references that survive parsing when a page escapes them twice:
/// numeric references and the named ones Italian entries use. `&amp;` is
/// left out so a literal `&amp;` in the source stays as written.
static RESIDUAL_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[aeiouAEIOU](?:grave|acute)|laquo|raquo|[lr]squo|[lr]dquo|ndash|mdash|hellip|nbsp|quot|apos|deg);",
    )
    .unwrap()
});

/// The closed set of element kinds the renderer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Bold,
    Italic,
    LineBreak,
    Paragraph,
    Footnote,
    Link,
    Wrapper,
    Other,
}

impl TagKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "strong" | "b" => TagKind::Bold,
            "em" | "i" => TagKind::Italic,
            "br" => TagKind::LineBreak,
            "p" => TagKind::Paragraph,
            "sup" => TagKind::Footnote,
            "a" => TagKind::Link,
            "span" => TagKind::Wrapper,
            _ => TagKind::Other,
        }
    }
}

/// Renders a subtree into a styled text stream.
pub fn render(node: &Node) -> TextStream {
    let mut stream = TextStream::new();
    render_into(node, &mut stream);
    stream
}

fn render_into(node: &Node, stream: &mut TextStream) {
    let el = match node {
        Node::Text(text) => {
            stream.push_text(&decode_entities(text));
            return;
        }
        Node::Element(el) => el,
    };

    let children = |stream: &mut TextStream| el.children.iter().for_each(|child| render_into(child, stream));

    match TagKind::from_tag(&el.tag) {
        TagKind::Bold => stream.styled(Style::Bold, children),
        TagKind::Italic => stream.styled(Style::Italic, children),
        TagKind::LineBreak => stream.line_break(),
        TagKind::Paragraph => {
            children(stream);
            stream.line_break();
        }
        TagKind::Footnote => {}
        TagKind::Link | TagKind::Wrapper | TagKind::Other => children(stream),
    }
}

/// Decodes entity references that survived parsing.
///
/// The parser already decodes one level of escaping. Pages that escape twice
/// leave literal `&egrave;` in text nodes; those are decoded again, but only
/// for numeric references and a fixed set of named ones. Anything else, such as
/// `&amp;` or unknown names, is kept verbatim.
pub fn decode_entities(text: &str) -> String {
    RESIDUAL_ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            Html::parse_fragment(&caps[0]).root_element().text().collect::<String>()
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;
    use rstest::rstest;

    fn render_html(html: &str) -> TextStream {
        let doc = Document::parse(html).unwrap();
        let body = doc.select("body").unwrap()[0];
        render(&Node::from_element(body))
    }

    #[test]
    fn test_plain_subtree_has_no_markers() {
        let stream = render_html("<div><span>una</span> <a href='/x'>parola</a></div>");
        assert_eq!(stream.to_ansi(), "una parola");
    }

    #[test]
    fn test_bold_and_italic_regions() {
        let stream = render_html("<p><strong>casa</strong> s. f. <em>abitazione</em></p>");
        assert_eq!(stream.to_ansi(), "\x1b[1mcasa\x1b[22m s. f. \x1b[3mabitazione\x1b[23m\n");
    }

    #[test]
    fn test_markers_balance_when_nested() {
        let stream = render_html("<p><b>a<i>b<strong>c</strong></i></b><em></em></p>");
        let out = stream.to_ansi();
        assert_eq!(out.matches("\x1b[1m").count(), out.matches("\x1b[22m").count());
        assert_eq!(out.matches("\x1b[3m").count(), out.matches("\x1b[23m").count());
        assert_eq!(out, "\x1b[1ma\x1b[3mb\x1b[1mc\x1b[22m\x1b[23m\x1b[22m\x1b[3m\x1b[23m\n");
    }

    #[test]
    fn test_footnotes_render_empty() {
        let stream = render_html("<p>lemma<sup><a href='#n1'>1</a><strong>nota</strong></sup> fine</p>");
        assert_eq!(stream.to_ansi(), "lemma fine\n");
    }

    #[rstest]
    #[case("<p>uno<br>due</p>", "uno\ndue\n")]
    #[case("<p>uno</p><p>due</p>", "uno\ndue\n")]
    #[case("<section><h2>titolo</h2></section>", "titolo")]
    #[case("<a href='https://www.treccani.it'>link</a>", "link")]
    fn test_structural_tags(#[case] html: &str, #[case] expected: &str) {
        assert_eq!(render_html(html).plain_text(), expected);
    }

    #[test]
    fn test_text_order_is_depth_first() {
        let stream = render_html("<div>a<span>b<i>c</i>d</span>e</div>");
        assert_eq!(stream.plain_text(), "abcde");
    }

    #[test]
    fn test_entities_decoded() {
        let stream = render_html("<p>perch&eacute; &amp;egrave;</p>");
        assert_eq!(stream.plain_text(), "perché è\n");
    }

    #[test]
    fn test_tag_kind_table() {
        assert_eq!(TagKind::from_tag("strong"), TagKind::Bold);
        assert_eq!(TagKind::from_tag("i"), TagKind::Italic);
        assert_eq!(TagKind::from_tag("sup"), TagKind::Footnote);
        assert_eq!(TagKind::from_tag("article"), TagKind::Other);
    }

    #[test]
    fn test_decode_leaves_plain_text_alone() {
        assert_eq!(decode_entities("a < b & c"), "a < b & c");
    }

    #[rstest]
    #[case("citt&agrave;", "città")]
    #[case("&laquo;casa&raquo;", "«casa»")]
    #[case("&#232; &#xE8;", "è è")]
    #[case("&amp;", "&amp;")]
    #[case("&amp;egrave; &copy;", "&amp;egrave; &copy;")]
    #[case("&agrave &foo;", "&agrave &foo;")]
    fn test_decode_only_known_references(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(decode_entities(text), expected);
    }

    #[test]
    fn test_double_escaped_ampersand_stays_literal() {
        let stream = render_html("<p>R&amp;amp;S</p>");
        assert_eq!(stream.plain_text(), "R&amp;S\n");
    }
}
