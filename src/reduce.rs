// The reducer, chunk joiner, and post-processor (spec §4.5, §4.8).
//
// `reduce` is a pure function of (tree, options, rule set): no traversal
// order is observable in the output besides left-to-right document order,
// matching spec §3's invariant "output byte-for-byte independent of
// traversal interruption."

use crate::classify;
use crate::dom::{DomNode, NodeType};
use crate::options::Options;
use crate::rules::{Resolution, RuleSet};
use crate::whitespace::CollapsedWhitespace;

/// `join(a, b)` (spec §4.5): collapses adjacent block separators to at most
/// one blank line while preserving single newlines.
pub fn join(a: &str, b: &str) -> String {
    if a.is_empty() {
        return b.to_string();
    }
    if b.is_empty() {
        return a.to_string();
    }

    let trimmed_a = a.trim_end_matches(['\r', '\n']);
    let stripped_a = a.len() - trimmed_a.len();
    let trimmed_b = b.trim_start_matches(['\r', '\n']);
    let stripped_b = b.len() - trimmed_b.len();

    let n = stripped_a.max(stripped_b).min(2);
    format!("{trimmed_a}{}{trimmed_b}", "\n".repeat(n))
}

struct Ctx<'a, N: DomNode> {
    rules: &'a RuleSet<N>,
    options: &'a Options<N>,
    collapsed: &'a CollapsedWhitespace<N::Id>,
}

/// Reduce a tree rooted at `node` to Markdown (spec §4.5 `reduce`).
pub fn reduce<N: DomNode + 'static>(
    node: &N,
    rules: &RuleSet<N>,
    options: &Options<N>,
    collapsed: &CollapsedWhitespace<N::Id>,
) -> String {
    let ctx = Ctx { rules, options, collapsed };
    reduce_node(&ctx, node)
}

fn reduce_node<N: DomNode + 'static>(ctx: &Ctx<N>, node: &N) -> String {
    match node.node_type() {
        NodeType::Text | NodeType::Whitespace | NodeType::CData => reduce_text(ctx, node),
        NodeType::Element => reduce_element(ctx, node),
        NodeType::Document => reduce_children(ctx, node),
        NodeType::Comment | NodeType::Unknown => String::new(),
    }
}

fn reduce_text<N: DomNode + 'static>(ctx: &Ctx<N>, node: &N) -> String {
    let text = match ctx.collapsed.get(node.id()) {
        Some(t) => t.to_string(),
        None => {
            if ctx.collapsed.is_omitted(node.id()) {
                return String::new();
            }
            node.text()
        }
    };

    if classify::has_code_ancestor(node) {
        text
    } else {
        (ctx.options.escape)(&text)
    }
}

fn reduce_element<N: DomNode + 'static>(ctx: &Ctx<N>, node: &N) -> String {
    if let Some(tag) = node.tag_name() {
        if ctx.options.keep_tags.contains(tag) {
            let raw_children = reduce_children(ctx, node);
            return (ctx.options.keep_replacement)(&raw_children, node);
        }
    }

    let content = reduce_children(ctx, node);
    let flanking = crate::flanking::compute(node, &content, ctx.options.preformatted_code);
    // Per spec §4.5: trimming is a full `.trim()` whenever either flank is
    // non-empty, not a strip of exactly the (possibly ASCII-adjusted) flank
    // strings — those are re-added outside the rule's replacement below.
    let trimmed: &str =
        if flanking.leading.is_empty() && flanking.trailing.is_empty() { &content } else { content.trim() };

    let converted = match ctx.rules.resolve(node, ctx.options) {
        Resolution::Blank => (ctx.options.blank_replacement)(trimmed, node),
        Resolution::Matched(rule) => (rule.replacement)(trimmed, node, ctx.options),
        Resolution::Keep => (ctx.options.keep_replacement)(trimmed, node),
        Resolution::Remove => String::new(),
        Resolution::Default => (ctx.options.default_replacement)(trimmed, node),
    };

    format!("{}{converted}{}", flanking.leading, flanking.trailing)
}

fn reduce_children<N: DomNode + 'static>(ctx: &Ctx<N>, node: &N) -> String {
    let mut accum = String::new();
    for child in node.children() {
        let piece = reduce_node(ctx, &child);
        accum = join(&accum, &piece);
    }
    accum
}

/// Post-processing pass (spec §4.8): NBSP re-encode, append trailers,
/// re-encode again, then trim.
pub fn post_process<N: DomNode + 'static>(
    body: String,
    rules: &RuleSet<N>,
    options: &Options<N>,
) -> String {
    let mut out = reencode_nbsp(&body);

    for trailer in rules.appends(options) {
        out = join(&out, &reencode_nbsp(&trailer));
    }

    let no_leading_newlines = out.trim_start_matches(['\n', '\r']);
    no_leading_newlines.trim_end().to_string()
}

fn reencode_nbsp(s: &str) -> String {
    if s.contains('\u{00A0}') {
        s.replace('\u{00A0}', "&nbsp;")
    } else {
        s.to_string()
    }
}

/// The keep-replacement: serialize `node` as raw HTML (spec §4.7 "Keep
/// replacement"). Void elements emit no closing tag; text escapes `& < >`,
/// attribute values additionally escape `"`.
pub fn serialize_as_html<N: DomNode>(node: &N) -> String {
    let mut out = String::new();
    serialize_node(node, &mut out);
    out
}

fn serialize_node<N: DomNode>(node: &N, out: &mut String) {
    match node.node_type() {
        NodeType::Text | NodeType::Whitespace | NodeType::CData => {
            out.push_str(&escape_html_text(&node.text()));
        }
        NodeType::Element => {
            let tag = node.tag_name().unwrap_or("");
            out.push('<');
            out.push_str(tag);
            for (name, value) in node.attributes() {
                out.push(' ');
                out.push_str(&name);
                out.push_str("=\"");
                out.push_str(&escape_html_attr(&value));
                out.push('"');
            }
            out.push('>');
            if !classify::is_void_tag(tag) {
                for child in node.children() {
                    serialize_node(&child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
        NodeType::Document => {
            for child in node.children() {
                serialize_node(&child, out);
            }
        }
        NodeType::Comment | NodeType::Unknown => {}
    }
}

fn escape_html_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

fn escape_html_attr(s: &str) -> String {
    escape_html_text(s).replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_empty_identity() {
        assert_eq!(join("abc", ""), "abc");
        assert_eq!(join("", "abc"), "abc");
        assert_eq!(join("", ""), "");
    }

    #[test]
    fn join_collapses_to_at_most_blank_line() {
        assert_eq!(join("a\n\n\n", "\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn join_preserves_single_newline() {
        assert_eq!(join("a\n", "b"), "a\nb");
        assert_eq!(join("a", "\nb"), "a\nb");
    }
}
