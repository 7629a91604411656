//! Label-adjacency field locator
//!
//! Finds "Director: John Woo" style metadata without assuming any site
//! structure. The only thing it relies on is that the label sits in an
//! emphasis-style element and the value is sibling text inside the same
//! container, which is the loosest correlation that survives template
//! churn on the target site.

use super::dom::Node;
use super::{clean_text, Field};

/// Tags the site uses for metadata labels.
const EMPHASIS_TAGS: &[&str] = &["b", "strong", "span", "label"];

fn is_emphasis(tag: &str) -> bool {
    EMPHASIS_TAGS.contains(&tag)
}

/// Locate one semantic field by its keyword synonyms.
///
/// Keywords must be lowercase. Scans emphasis elements in document
/// order; the first label containing any keyword whose container yields
/// a cleaned value longer than one character wins. No acceptable match
/// yields `Field::Missing`.
pub fn locate(root: &Node, keywords: &[&str]) -> Field {
    Field::from_attempt(scan(root, keywords))
}

fn scan(parent: &Node, keywords: &[&str]) -> Option<String> {
    let Node::Element { children, .. } = parent else {
        return None;
    };
    for child in children {
        if let Node::Element { tag, .. } = child {
            if is_emphasis(tag) {
                let label = child.full_text();
                let lowered = label.to_lowercase();
                if keywords.iter().any(|k| lowered.contains(k)) {
                    let value = strip_label(&parent.full_text(), &label);
                    if value.chars().count() > 1 {
                        return Some(value);
                    }
                }
            }
            if let Some(value) = scan(child, keywords) {
                return Some(value);
            }
        }
    }
    None
}

/// Remove the label text from its container's text, then the separator
/// punctuation the site sprinkles between label and value.
fn strip_label(container: &str, label: &str) -> String {
    let without_label = container.replacen(label, "", 1);
    let without_punct: String = without_label
        .chars()
        .filter(|c| !matches!(c, ':' | '|' | '-'))
        .collect();
    clean_text(&without_punct)
}
