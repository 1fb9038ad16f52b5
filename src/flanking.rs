// Flanking-whitespace analyzer (spec §4.3).
//
// Markdown delimiters must not be separated from their content by
// whitespace, so leading/trailing whitespace on inline content is hoisted
// outside the rule's emitted delimiters. NBSP must survive as a visible
// HTML entity rather than collapse away, so it is excluded from the ASCII
// stripping and re-encoded to `&nbsp;` in the hoisted text.

use crate::classify;
use crate::dom::DomNode;

/// Leading/trailing whitespace hoisted outside a node's Markdown content.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flanking {
    pub leading: String,
    pub trailing: String,
}

const NBSP: char = '\u{00A0}';

/// Compute the flanking whitespace for `node`, given the already-rendered
/// `content` for its subtree. Block elements are never flanked: block
/// content owns its own newlines. A `<code>` node is also exempt when
/// `preformatted_code` is set (spec §4.3, §9 open question 2): its text
/// must be emitted byte-for-byte, same as `<pre>`, which `is_block` already
/// exempts since `pre` is itself a block tag.
pub fn compute<N: DomNode>(node: &N, content: &str, preformatted_code: bool) -> Flanking {
    if classify::is_block(node) || (preformatted_code && classify::is_code(node)) {
        return Flanking::default();
    }

    let leading_len = content
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(char::len_utf8)
        .sum::<usize>();
    let trailing_len = content
        .chars()
        .rev()
        .take_while(|c| c.is_whitespace())
        .map(char::len_utf8)
        .sum::<usize>();

    let (lead_run, trail_run) = if leading_len + trailing_len >= content.len() {
        // The whole content is whitespace; avoid double-counting an overlap.
        (content, "")
    } else {
        (&content[..leading_len], &content[content.len() - trailing_len..])
    };

    let mut leading = lead_run.to_string();
    let mut trailing = trail_run.to_string();

    // spec §9 open question: reproduce literally — ASCII stripping on a
    // flank is suppressed only when the adjacent sibling already supplies
    // ASCII-space-adjacent text at that edge.
    if sibling_supplies_ascii_space(node, Side::Leading) {
        leading = strip_ascii_portion(&leading, Side::Leading);
    }
    if sibling_supplies_ascii_space(node, Side::Trailing) {
        trailing = strip_ascii_portion(&trailing, Side::Trailing);
    }

    Flanking { leading: reencode_nbsp(&leading), trailing: reencode_nbsp(&trailing) }
}

#[derive(Clone, Copy)]
enum Side {
    Leading,
    Trailing,
}

/// Whether the sibling on the given side is an inline node whose adjacent
/// text already ends/starts with an ASCII space, in which case this node's
/// own ASCII-space run on that edge is redundant and should be dropped
/// (only the NBSP/Unicode portion survives).
fn sibling_supplies_ascii_space<N: DomNode>(node: &N, side: Side) -> bool {
    let sibling = match side {
        Side::Leading => previous_sibling(node),
        Side::Trailing => node.next_sibling(),
    };
    let Some(sibling) = sibling else { return false };
    if classify::is_block(&sibling) {
        return false;
    }
    let text = sibling.text_content();
    match side {
        Side::Leading => text.ends_with(' '),
        Side::Trailing => text.starts_with(' '),
    }
}

fn previous_sibling<N: DomNode>(node: &N) -> Option<N> {
    let parent = node.parent()?;
    let mut prev = None;
    let mut cur = parent.first_child();
    while let Some(n) = cur {
        if n.id() == node.id() {
            return prev;
        }
        cur = n.next_sibling();
        prev = Some(n);
    }
    None
}

/// Split a whitespace run into its ASCII prefix/suffix and its non-ASCII
/// (Unicode, e.g. NBSP) remainder, in byte order, dropping the ASCII part.
fn strip_ascii_portion(run: &str, side: Side) -> String {
    match side {
        Side::Leading => run.trim_start_matches(|c: char| c.is_ascii_whitespace()).to_string(),
        Side::Trailing => run.trim_end_matches(|c: char| c.is_ascii_whitespace()).to_string(),
    }
}

fn reencode_nbsp(s: &str) -> String {
    if !s.contains(NBSP) {
        return s.to_string();
    }
    s.replace(NBSP, "&nbsp;")
}
