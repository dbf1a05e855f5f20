use crate::parse::Element;

/// An owned copy of a document subtree.
///
/// Located content is copied into this form before noise stripping so the
/// parsed [`crate::Document`] is never mutated. Only text and element nodes
/// survive the copy; comments, doctypes and processing instructions carry no
/// renderable content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Element(ElementNode),
}

/// An element with its lowercase tag, attributes in source order and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl ElementNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl Node {
    /// Deep-copies a borrowed element into an owned tree.
    pub fn from_element(element: Element<'_>) -> Self {
        copy_element(element.element_ref())
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn element(tag: &str, attrs: &[(&str, &str)], children: Vec<Node>) -> Self {
        Node::Element(ElementNode {
            tag: tag.to_lowercase(),
            attrs: attrs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            children,
        })
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Whether any node strictly below this one satisfies `predicate`.
    pub fn has_descendant<F>(&self, predicate: &F) -> bool
    where
        F: Fn(&ElementNode) -> bool,
    {
        match self {
            Node::Text(_) => false,
            Node::Element(el) => el
                .children
                .iter()
                .any(|child| child.as_element().is_some_and(predicate) || child.has_descendant(predicate)),
        }
    }

    /// Concatenated text of every text node, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn copy_element(element: scraper::ElementRef<'_>) -> Node {
    let value = element.value();
    let children = element
        .children()
        .filter_map(|child| match child.value() {
            scraper::Node::Text(text) => Some(Node::Text(text.text.to_string())),
            scraper::Node::Element(_) => scraper::ElementRef::wrap(child).map(copy_element),
            _ => None,
        })
        .collect();

    Node::Element(ElementNode {
        tag: value.name().to_lowercase(),
        attrs: value.attrs().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        children,
    })
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(el) => el.children.iter().for_each(|child| collect_text(child, out)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Document;

    #[test]
    fn test_copy_keeps_text_and_structure() {
        let doc = Document::parse(r#"<p class="x">uno <strong>due</strong><!-- c --> tre</p>"#).unwrap();
        let p = doc.select("p").unwrap()[0];
        let node = Node::from_element(p);

        let el = node.as_element().unwrap();
        assert_eq!(el.tag, "p");
        assert_eq!(el.attr("class"), Some("x"));
        assert_eq!(el.children.len(), 3);
        assert_eq!(node.text_content(), "uno due tre");
    }

    #[test]
    fn test_copy_does_not_touch_document() {
        let doc = Document::parse("<p>uno</p>").unwrap();
        let p = doc.select("p").unwrap()[0];
        let mut node = Node::from_element(p);
        if let Node::Element(el) = &mut node {
            el.children.clear();
        }
        assert_eq!(p.text(), "uno");
    }

    #[test]
    fn test_has_descendant_searches_any_depth() {
        let node = Node::element(
            "strong",
            &[],
            vec![Node::element("span", &[], vec![Node::element("a", &[("id", "link2")], vec![])])],
        );
        assert!(node.has_descendant(&|el: &ElementNode| el.tag == "a"));
        assert!(!node.has_descendant(&|el: &ElementNode| el.tag == "strong"));
    }
}
