// The DOM collaborator contract (spec §6.1).
//
// The core never parses HTML itself and never mutates the tree it walks; it
// only needs read-only navigation, attribute lookup, and text access. Any
// parser can be wired in by implementing `DomNode` for its handle type — see
// `html_dom` for the `html5ever` / `markup5ever_rcdom` adapter used by
// `Service`.
//
// Node identity (§3 "Invariants": identities are stable during a
// conversion) is modeled as an associated `Id` type rather than a trait
// method returning `&Self`, so the whitespace-collapse table and rule-set
// bookkeeping can key off a plain `Copy + Eq + Hash` value instead of
// cloning nodes or comparing by pointer through a trait object.

use std::hash::Hash;

/// The type tag of a DOM node (spec §3 "Node (external)").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Document,
    Element,
    Text,
    Whitespace,
    CData,
    Comment,
    Unknown,
}

impl NodeType {
    /// Text-like nodes carry raw text the collapser and reducer operate on.
    pub fn is_text_like(self) -> bool {
        matches!(self, NodeType::Text | NodeType::Whitespace | NodeType::CData)
    }
}

/// A read-only handle into a parsed HTML tree.
///
/// Implementations are expected to be cheap to clone (e.g. a reference-counted
/// pointer or an index into an arena) since the core clones handles freely
/// while walking siblings and children.
pub trait DomNode: Clone {
    /// Stable identity, valid for the lifetime of one conversion call.
    type Id: Copy + Eq + Hash;

    fn id(&self) -> Self::Id;
    fn node_type(&self) -> NodeType;
    fn parent(&self) -> Option<Self>;
    fn next_sibling(&self) -> Option<Self>;
    fn first_child(&self) -> Option<Self>;

    /// Children in document order. Default implementation walks
    /// `first_child`/`next_sibling`; adapters with a direct child list may
    /// override this for efficiency.
    fn children(&self) -> Vec<Self> {
        let mut out = Vec::new();
        let mut cur = self.first_child();
        while let Some(node) = cur {
            cur = node.next_sibling();
            out.push(node);
        }
        out
    }

    /// Lowercased tag name, `None` for non-element nodes.
    fn tag_name(&self) -> Option<&str>;

    /// Case-insensitive tag match; elements only.
    fn has_tag(&self, name: &str) -> bool {
        self.tag_name().is_some_and(|t| t.eq_ignore_ascii_case(name))
    }

    /// Raw attribute value, case-insensitive name lookup. Empty string when
    /// absent (spec §7: "no matching attribute" is handled silently by
    /// callers, never by returning an `Option`).
    fn attribute(&self, name: &str) -> String;

    /// All attributes as (name, value) pairs, in source order.
    fn attributes(&self) -> Vec<(String, String)>;

    /// Raw text for text-like nodes; empty for everything else.
    fn text(&self) -> String;

    /// Recursive text-content fallback (concatenation of all descendant
    /// text-like nodes), used by the blank-node test and flanking analyzer.
    fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text_content(self, &mut out);
        out
    }
}

fn collect_text_content<N: DomNode>(node: &N, out: &mut String) {
    if node.node_type().is_text_like() {
        out.push_str(&node.text());
        return;
    }
    for child in node.children() {
        collect_text_content(&child, out);
    }
}
