//! Parser-independent node tree for heuristic traversal
//!
//! The field locator works on this minimal tree instead of on
//! `scraper`'s node types, so its pairing heuristic can be tested
//! against synthetic trees without any HTML involved.

use scraper::{ElementRef, Html};

/// A stripped-down DOM node: element with children, or text leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element { tag: String, children: Vec<Node> },
    Text(String),
}

impl Node {
    /// Element constructor, mostly for building test trees.
    pub fn el(tag: &str, children: Vec<Node>) -> Node {
        Node::Element {
            tag: tag.to_string(),
            children,
        }
    }

    /// Text leaf constructor.
    pub fn text(content: &str) -> Node {
        Node::Text(content.to_string())
    }

    /// Convert a parsed document into the generic tree, rooted at `<html>`.
    pub fn from_document(doc: &Html) -> Node {
        Self::from_element(doc.root_element())
    }

    fn from_element(el: ElementRef) -> Node {
        let mut children = Vec::new();
        for child in el.children() {
            if let Some(child_el) = ElementRef::wrap(child) {
                children.push(Self::from_element(child_el));
            } else if let Some(t) = child.value().as_text() {
                children.push(Node::Text(t.to_string()));
            }
            // comments, doctypes etc. carry nothing useful
        }
        Node::Element {
            tag: el.value().name().to_ascii_lowercase(),
            children,
        }
    }

    /// Tag name, `None` for text leaves.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Node::Element { tag, .. } => Some(tag),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and all descendants, document order.
    pub fn full_text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(t),
            Node::Element { children, .. } => {
                for child in children {
                    child.collect_text(out);
                }
            }
        }
    }
}
