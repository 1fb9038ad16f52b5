// The whitespace collapser (spec §4.2).
//
// Simulates a browser's inline whitespace normalization in a single
// depth-first pass over the tree, producing a replacement table and an omit
// set rather than mutating the DOM — the core never requires the parser
// collaborator to expose mutation (spec §9, "'Mutable' DOM avoided").

use std::collections::{HashMap, HashSet};

use regex::Regex;
use std::sync::LazyLock;

use crate::classify;
use crate::dom::{DomNode, NodeType};

static RUN_OF_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \r\n\t]+").unwrap());

/// The per-conversion output of the collapser: a map from text-node identity
/// to its collapsed replacement text, plus a set of text-node identities
/// that collapsed to nothing and should be skipped entirely.
pub struct CollapsedWhitespace<Id> {
    replacements: HashMap<Id, String>,
    omit: HashSet<Id>,
}

impl<Id: Copy + Eq + std::hash::Hash> CollapsedWhitespace<Id> {
    fn new() -> Self {
        Self { replacements: HashMap::new(), omit: HashSet::new() }
    }

    /// The text to use for a given text-like node: its collapsed replacement
    /// if one was recorded, `None` if the node was omitted entirely.
    pub fn get(&self, id: Id) -> Option<&str> {
        if self.omit.contains(&id) {
            None
        } else {
            self.replacements.get(&id).map(String::as_str)
        }
    }

    pub fn is_omitted(&self, id: Id) -> bool {
        self.omit.contains(&id)
    }
}

struct Walker<N: DomNode> {
    table: CollapsedWhitespace<N::Id>,
    prev_text_node: Option<N>,
    keep_leading: bool,
    preformatted_code: bool,
}

/// Run the collapser over a tree rooted at `root`. `root` is never modified
/// (there is nothing to modify — this never mutates the DOM) even if it is
/// itself a `<pre>`: descent into preformatted elements is simply skipped.
/// When `preformatted_code` is set (spec §4.2), a `<code>` element is an
/// additional preformatted boundary, same as `<pre>`.
pub fn collapse<N: DomNode>(root: &N, preformatted_code: bool) -> CollapsedWhitespace<N::Id> {
    #[cfg(feature = "tracing")]
    tracing::trace!("collapsing whitespace");
    let mut walker =
        Walker::<N> { table: CollapsedWhitespace::new(), prev_text_node: None, keep_leading: false, preformatted_code };
    walker.walk(root);
    walker.finish();
    walker.table
}

impl<N: DomNode> Walker<N> {
    fn is_preformatted_boundary(&self, node: &N) -> bool {
        classify::is_pre(node) || (self.preformatted_code && classify::is_code(node))
    }

    fn walk(&mut self, node: &N) {
        match node.node_type() {
            NodeType::Text | NodeType::Whitespace | NodeType::CData => self.visit_text(node),
            NodeType::Element => {
                let is_pre_like = self.is_preformatted_boundary(node);
                self.enter_element(node);
                if !is_pre_like {
                    for child in node.children() {
                        self.walk(&child);
                    }
                }
            }
            NodeType::Document => {
                for child in node.children() {
                    self.walk(&child);
                }
            }
            NodeType::Comment | NodeType::Unknown => {}
        }
    }

    fn visit_text(&mut self, node: &N) {
        let raw = node.text();
        let mut collapsed = RUN_OF_WHITESPACE.replace_all(&raw, " ").into_owned();

        let prev_ends_with_space = match &self.prev_text_node {
            None => true,
            Some(prev) => self
                .table
                .replacements
                .get(&prev.id())
                .is_some_and(|s| s.ends_with(' ')),
        };

        if prev_ends_with_space && !self.keep_leading && collapsed.starts_with(' ') {
            collapsed.remove(0);
        }

        if collapsed.is_empty() {
            #[cfg(feature = "tracing")]
            tracing::trace!("text node collapsed to nothing, omitting");
            self.table.omit.insert(node.id());
            return;
        }

        self.table.replacements.insert(node.id(), collapsed);
        self.prev_text_node = Some(node.clone());
        self.keep_leading = false;
    }

    fn enter_element(&mut self, node: &N) {
        if classify::is_block(node) || node.has_tag("br") {
            self.strip_trailing_space_of_prev();
            self.prev_text_node = None;
            self.keep_leading = false;
        } else if classify::is_void(node) || self.is_preformatted_boundary(node) {
            self.prev_text_node = None;
            self.keep_leading = true;
        } else {
            self.keep_leading = false;
        }
    }

    fn strip_trailing_space_of_prev(&mut self) {
        if let Some(prev) = &self.prev_text_node {
            let id = prev.id();
            if let Some(text) = self.table.replacements.get_mut(&id) {
                if text.ends_with(' ') {
                    text.pop();
                    if text.is_empty() {
                        self.table.replacements.remove(&id);
                        self.table.omit.insert(id);
                    }
                }
            }
        }
    }

    fn finish(&mut self) {
        self.strip_trailing_space_of_prev();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::html_dom;

    #[test]
    fn collapses_runs_of_whitespace() {
        let root = html_dom::parse("<p>Foo   \n\t Bar</p>");
        let table = collapse(&root, false);
        let p = root.children().into_iter().find(|n| n.has_tag("p")).unwrap();
        let text = p.first_child().unwrap();
        assert_eq!(table.get(text.id()), Some("Foo Bar"));
    }

    #[test]
    fn drops_leading_space_after_nothing() {
        let root = html_dom::parse("<p> Foo</p>");
        let table = collapse(&root, false);
        let p = root.children().into_iter().find(|n| n.has_tag("p")).unwrap();
        let text = p.first_child().unwrap();
        assert_eq!(table.get(text.id()), Some("Foo"));
    }

    #[test]
    fn preformatted_subtree_is_untouched() {
        let root = html_dom::parse("<pre>  keep   me  </pre>");
        let table = collapse(&root, false);
        let pre = root.children().into_iter().find(|n| n.has_tag("pre")).unwrap();
        let text = pre.first_child().unwrap();
        // pre's children are never visited, so no entry exists either way.
        assert_eq!(table.get(text.id()), None);
    }

    #[test]
    fn code_is_untouched_only_when_preformatted_code_is_set() {
        let root = html_dom::parse("<code>  keep   me  </code>");
        let code = root.children().into_iter().find(|n| n.has_tag("code")).unwrap();
        let text = code.first_child().unwrap();

        let collapsed_by_default = collapse(&root, false);
        assert_eq!(collapsed_by_default.get(text.id()), Some("keep me"));

        let preformatted = collapse(&root, true);
        assert_eq!(preformatted.get(text.id()), None);
    }

    #[test]
    fn idempotent_across_runs() {
        let root = html_dom::parse("<p>Foo   Bar</p><p>  Baz</p>");
        let t1 = collapse(&root, false);
        let t2 = collapse(&root, false);
        let p1 = root.children().into_iter().find(|n| n.has_tag("p")).unwrap();
        let text = p1.first_child().unwrap();
        assert_eq!(t1.get(text.id()), t2.get(text.id()));
    }
}
