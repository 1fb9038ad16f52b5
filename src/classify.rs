// Pure node-classification predicates (spec §4.1).
//
// The tag lists are closed sets, encoded as sorted arrays searched with
// binary search — matches the "Whitespace classification tables" design
// note in spec §9 ("encode as compile-time-known sorted arrays or hash sets
// for O(1)-ish membership").

use crate::dom::DomNode;

// Keep sorted: `binary_search` requires it.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "audio", "blockquote", "body", "canvas",
    "center", "dd", "dir", "div", "dl", "dt", "fieldset", "figcaption",
    "figure", "footer", "form", "frameset", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hgroup", "hr", "html", "isindex", "li", "main", "menu",
    "nav", "noframes", "noscript", "ol", "output", "p", "pre", "section",
    "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "command", "embed", "hr", "img", "input",
    "keygen", "link", "meta", "param", "source", "track", "wbr",
];

const MEANINGFUL_WHEN_BLANK_TAGS: &[&str] =
    &["a", "audio", "iframe", "script", "table", "tbody", "td", "tfoot", "th", "video"];

fn in_set(set: &[&str], tag: &str) -> bool {
    set.binary_search(&tag).is_ok()
}

pub fn is_block_tag(tag: &str) -> bool {
    in_set(BLOCK_TAGS, tag)
}

pub fn is_void_tag(tag: &str) -> bool {
    in_set(VOID_TAGS, tag)
}

pub fn is_meaningful_when_blank_tag(tag: &str) -> bool {
    in_set(MEANINGFUL_WHEN_BLANK_TAGS, tag)
}

pub fn is_block<N: DomNode>(node: &N) -> bool {
    node.tag_name().is_some_and(is_block_tag)
}

pub fn is_void<N: DomNode>(node: &N) -> bool {
    node.tag_name().is_some_and(is_void_tag)
}

pub fn is_pre<N: DomNode>(node: &N) -> bool {
    node.has_tag("pre")
}

pub fn is_code<N: DomNode>(node: &N) -> bool {
    node.has_tag("code")
}

pub fn is_meaningful_when_blank<N: DomNode>(node: &N) -> bool {
    node.tag_name().is_some_and(is_meaningful_when_blank_tag)
}

/// Node or any ancestor is a `<code>` element.
pub fn has_code_ancestor<N: DomNode>(node: &N) -> bool {
    let mut cur = Some(node.clone());
    while let Some(n) = cur {
        if n.has_tag("code") {
            return true;
        }
        cur = n.parent();
    }
    false
}

/// Any descendant matches `is_meaningful_when_blank`.
pub fn has_meaningful_when_blank_descendant<N: DomNode>(node: &N) -> bool {
    node.children()
        .iter()
        .any(|c| is_meaningful_when_blank(c) || has_meaningful_when_blank_descendant(c))
}

/// Any descendant matches `is_void`.
pub fn has_void_descendant<N: DomNode>(node: &N) -> bool {
    node.children()
        .iter()
        .any(|c| is_void(c) || has_void_descendant(c))
}

/// An element is blank iff it is not void, not meaningful-when-blank, its
/// collected text is only Unicode whitespace, and it has no void or
/// meaningful-when-blank descendant (spec §4.1).
pub fn is_blank<N: DomNode>(node: &N) -> bool {
    if is_void(node) || is_meaningful_when_blank(node) {
        return false;
    }
    if !node.text_content().chars().all(char::is_whitespace) {
        return false;
    }
    !has_void_descendant(node) && !has_meaningful_when_blank_descendant(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_tags_sorted() {
        let mut sorted = BLOCK_TAGS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, BLOCK_TAGS);
    }

    #[test]
    fn void_tags_sorted() {
        let mut sorted = VOID_TAGS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, VOID_TAGS);
    }

    #[test]
    fn meaningful_tags_sorted() {
        let mut sorted = MEANINGFUL_WHEN_BLANK_TAGS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, MEANINGFUL_WHEN_BLANK_TAGS);
    }

    #[test]
    fn block_and_void_classification() {
        assert!(is_block_tag("div"));
        assert!(is_block_tag("h3"));
        assert!(!is_block_tag("span"));
        assert!(is_void_tag("br"));
        assert!(!is_void_tag("div"));
    }
}
