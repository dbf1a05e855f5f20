//! Backlink noise removal.
//!
//! Treccani marks internal back-references by wrapping a link with a fixed
//! `id` in bold. Those wrappers repeat the headword and must not reach the
//! output. They are removed here, structurally; footnote markers are left in
//! place and elided by the renderer instead.

use crate::tree::{ElementNode, Node};

/// Identifier carried by back-reference links.
pub const BACKLINK_ID: &str = "link2";

/// Tags treated as bold emphasis.
pub(crate) fn is_bold_tag(tag: &str) -> bool {
    matches!(tag, "strong" | "b")
}

/// Removes every bold element under `node` that contains, at any depth, a
/// link whose `id` equals `sentinel`. Returns how many elements were removed.
///
/// `node` itself is never removed, even when it matches.
pub fn strip_backlinks(node: &mut Node, sentinel: &str) -> usize {
    let Node::Element(el) = node else {
        return 0;
    };

    let is_backlink = |candidate: &ElementNode| candidate.tag == "a" && candidate.attr("id") == Some(sentinel);
    let before = el.children.len();
    el.children.retain(|child| {
        let noisy = child
            .as_element()
            .is_some_and(|child_el| is_bold_tag(&child_el.tag))
            && child.has_descendant(&is_backlink);
        if noisy {
            tracing::trace!(text = %child.text_content(), "stripping backlink emphasis");
        }
        !noisy
    });

    let removed = before - el.children.len();
    removed
        + el
            .children
            .iter_mut()
            .map(|child| strip_backlinks(child, sentinel))
            .sum::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backlink() -> Node {
        Node::element("a", &[("id", BACKLINK_ID), ("href", "#top")], vec![Node::text("casa")])
    }

    #[test]
    fn test_removes_bold_with_backlink() {
        let mut node = Node::element(
            "p",
            &[],
            vec![Node::element("strong", &[], vec![backlink()]), Node::text(" definizione")],
        );

        assert_eq!(strip_backlinks(&mut node, BACKLINK_ID), 1);
        assert_eq!(node.text_content(), " definizione");
    }

    #[test]
    fn test_backlink_found_at_any_depth() {
        let mut node = Node::element(
            "div",
            &[],
            vec![Node::element(
                "p",
                &[],
                vec![Node::element("b", &[], vec![Node::element("span", &[], vec![backlink()])])],
            )],
        );

        assert_eq!(strip_backlinks(&mut node, BACKLINK_ID), 1);
        assert_eq!(node.text_content(), "");
    }

    #[test]
    fn test_keeps_bold_without_sentinel() {
        let other_link = Node::element("a", &[("id", "link3")], vec![Node::text("casa")]);
        let mut node = Node::element("p", &[], vec![Node::element("strong", &[], vec![other_link])]);
        let original = node.clone();

        assert_eq!(strip_backlinks(&mut node, BACKLINK_ID), 0);
        assert_eq!(node, original);
    }

    #[test]
    fn test_keeps_italic_with_backlink() {
        let mut node = Node::element("p", &[], vec![Node::element("em", &[], vec![backlink()])]);
        let original = node.clone();

        assert_eq!(strip_backlinks(&mut node, BACKLINK_ID), 0);
        assert_eq!(node, original);
    }

    #[test]
    fn test_keeps_bare_backlink_outside_bold() {
        let mut node = Node::element("p", &[], vec![backlink()]);
        assert_eq!(strip_backlinks(&mut node, BACKLINK_ID), 0);
        assert_eq!(node.text_content(), "casa");
    }

    #[test]
    fn test_root_is_never_removed() {
        let mut node = Node::element("strong", &[], vec![backlink()]);
        assert_eq!(strip_backlinks(&mut node, BACKLINK_ID), 0);
        assert_eq!(node.text_content(), "casa");
    }
}
