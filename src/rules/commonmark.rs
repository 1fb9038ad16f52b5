// The built-in CommonMark rule set (spec §4.7).
//
// One function per contract in spec §4.7, assembled by `build()` into the
// `builtin_rules` list a fresh `RuleSet` is constructed with. The
// reference-link accumulator is modeled as the spec's design notes (§9)
// prescribe: "per-conversion state passed through the rule invocation, not
// a process-global" — here, an `Rc<RefCell<Vec<_>>>` captured by both the
// link rule's replacement and its `append`, cleared when `append` runs.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;

use crate::dom::DomNode;
use crate::options::{LinkStyle, Options, ReferenceStyle};
use crate::rules::Rule;

pub fn build<N: DomNode + 'static>() -> Vec<Rule<N>> {
    vec![
        paragraph(),
        line_break(),
        heading(1),
        heading(2),
        heading(3),
        heading(4),
        heading(5),
        heading(6),
        blockquote(),
        list(),
        list_item(),
        code_block(),
        horizontal_rule(),
        link(),
        emphasis(),
        strong(),
        inline_code(),
        image(),
    ]
}

fn paragraph<N: DomNode + 'static>() -> Rule<N> {
    Rule::new("paragraph", |n: &N, _| n.has_tag("p"), |content, _n, _o| format!("\n\n{content}\n\n"))
}

fn line_break<N: DomNode + 'static>() -> Rule<N> {
    Rule::new("line-break", |n: &N, _| n.has_tag("br"), |_content, _n, o| {
        format!("{}\n", o.line_break_literal)
    })
}

fn heading<N: DomNode + 'static>(level: u8) -> Rule<N> {
    let tag: &'static str = match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    };
    let key: &'static str = match level {
        1 => "heading-1",
        2 => "heading-2",
        3 => "heading-3",
        4 => "heading-4",
        5 => "heading-5",
        _ => "heading-6",
    };
    Rule::new(
        key,
        move |n: &N, _| n.has_tag(tag),
        move |content, _n, o| {
            use crate::options::HeadingStyle;
            if level <= 2 && o.heading_style == HeadingStyle::Setext {
                let underline = if level == 1 { '=' } else { '-' };
                let len = content.chars().count().max(1);
                format!("\n\n{content}\n{}\n\n", underline.to_string().repeat(len))
            } else {
                format!("\n\n{} {content}\n\n", "#".repeat(level as usize))
            }
        },
    )
}

fn blockquote<N: DomNode + 'static>() -> Rule<N> {
    Rule::new("blockquote", |n: &N, _| n.has_tag("blockquote"), |content, _n, _o| {
        let trimmed = content.trim_matches(['\n', '\r']);
        let quoted: Vec<String> = trimmed.split('\n').map(|line| format!("> {line}")).collect();
        format!("\n\n{}\n\n", quoted.join("\n"))
    })
}

fn list<N: DomNode + 'static>() -> Rule<N> {
    Rule::new(
        "list",
        |n: &N, _| n.has_tag("ul") || n.has_tag("ol"),
        |content, node, _o| {
            let trimmed = content.trim_matches(['\n', '\r']);
            let is_last_in_li = node
                .parent()
                .map(|p| p.has_tag("li") && is_last_element_child(node, &p))
                .unwrap_or(false);
            if is_last_in_li {
                format!("\n{trimmed}")
            } else {
                format!("\n\n{trimmed}\n\n")
            }
        },
    )
}

fn list_item<N: DomNode + 'static>() -> Rule<N> {
    Rule::new("list-item", |n: &N, _| n.has_tag("li"), |content, node, o| {
        let no_leading = content.trim_start_matches('\n');
        let trimmed_trailing = no_leading.trim_end_matches('\n');
        let had_trailing_newline = trimmed_trailing.len() != no_leading.len();
        let body = if had_trailing_newline { format!("{trimmed_trailing}\n") } else { trimmed_trailing.to_string() };
        let indented = indent_continuation_lines(&body);

        let prefix = match node.parent() {
            Some(p) if p.has_tag("ol") => {
                let start: u32 = {
                    let raw = p.attribute("start");
                    raw.parse().unwrap_or(1)
                };
                let index = index_among_element_siblings(node, &p) as u32;
                format!("{}.  ", start + index)
            }
            _ => format!("{}   ", o.bullet_marker.as_str()),
        };

        let next_li = next_element_sibling(node).is_some();
        let mut out = indented;
        if next_li && out.contains('\n') && !out.ends_with("\n\n") {
            if out.ends_with('\n') {
                out.push('\n');
            } else {
                out.push_str("\n\n");
            }
        }
        if next_li && !out.ends_with('\n') {
            out.push('\n');
        }
        format!("{prefix}{out}")
    })
}

static BACKTICK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new("`{3,}").unwrap());
static TILDE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new("~{3,}").unwrap());

fn code_block<N: DomNode + 'static>() -> Rule<N> {
    Rule::new(
        "code-block",
        |n: &N, _| n.has_tag("pre") && code_child(n).is_some(),
        |_content, node, o| {
            use crate::options::{CodeBlockStyle, FenceLiteral};
            let code = code_child(node).expect("filter guarantees a code child");
            let raw = code.text_content();
            let raw = raw.strip_suffix('\n').unwrap_or(&raw);

            match o.code_block_style {
                CodeBlockStyle::Indented => {
                    let indented: Vec<String> = raw.split('\n').map(|l| format!("    {l}")).collect();
                    format!("\n\n{}\n\n", indented.join("\n"))
                }
                CodeBlockStyle::Fenced => {
                    let language = code
                        .attribute("class")
                        .split_whitespace()
                        .find_map(|c| c.strip_prefix("language-").map(str::to_string))
                        .unwrap_or_default();
                    let fence_char = o.fence_literal.char();
                    let run_regex = match o.fence_literal {
                        FenceLiteral::Backtick => &*BACKTICK_RUN,
                        FenceLiteral::Tilde => &*TILDE_RUN,
                    };
                    let longest_run = run_regex.find_iter(raw).map(|m| m.len()).max().unwrap_or(0);
                    let fence_len = if longest_run >= 3 { longest_run + 1 } else { 3 };
                    let fence = fence_char.to_string().repeat(fence_len);
                    format!("\n\n{fence}{language}\n{raw}\n{fence}\n\n")
                }
            }
        },
    )
}

fn horizontal_rule<N: DomNode + 'static>() -> Rule<N> {
    Rule::new("horizontal-rule", |n: &N, _| n.has_tag("hr"), |_content, _n, o| {
        format!("\n\n{}\n\n", o.horizontal_rule)
    })
}

struct RefEntry {
    label: String,
    url: String,
    title: Option<String>,
}

static TITLE_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n+").unwrap());

fn format_title(title: &str) -> String {
    let collapsed = TITLE_NEWLINES.replace_all(title, "\n");
    format!(" \"{}\"", collapsed.replace('"', "\\\""))
}

fn escape_href_parens(href: &str) -> String {
    href.replace('(', "\\(").replace(')', "\\)")
}

fn link<N: DomNode + 'static>() -> Rule<N> {
    let refs: Rc<RefCell<Vec<RefEntry>>> = Rc::new(RefCell::new(Vec::new()));
    let refs_for_replacement = refs.clone();

    Rule::new(
        "link",
        |n: &N, _| n.has_tag("a") && !n.attribute("href").is_empty(),
        move |content, node, o| {
            let href = o.resolve_url(&node.attribute("href"));
            let title_attr = node.attribute("title");

            match o.link_style {
                LinkStyle::Inlined => {
                    let title_part = if title_attr.is_empty() { String::new() } else { format_title(&title_attr) };
                    format!("[{content}]({}{title_part})", escape_href_parens(&href))
                }
                LinkStyle::Referenced => {
                    let title = if title_attr.is_empty() { None } else { Some(title_attr) };
                    let mut table = refs_for_replacement.borrow_mut();
                    match o.reference_style {
                        ReferenceStyle::Full => {
                            let label = (table.len() + 1).to_string();
                            table.push(RefEntry { label: label.clone(), url: href, title });
                            format!("[{content}][{label}]")
                        }
                        ReferenceStyle::Collapsed => {
                            table.push(RefEntry { label: content.to_string(), url: href, title });
                            format!("[{content}][]")
                        }
                        ReferenceStyle::Shortcut => {
                            table.push(RefEntry { label: content.to_string(), url: href, title });
                            format!("[{content}]")
                        }
                    }
                }
            }
        },
    )
    .with_append(move |_o| {
        let mut table = refs.borrow_mut();
        if table.is_empty() {
            return None;
        }
        let lines: Vec<String> = table
            .iter()
            .map(|e| {
                let title_part = e.title.as_deref().map(format_title).unwrap_or_default();
                format!("[{}]: {}{title_part}", e.label, e.url)
            })
            .collect();
        table.clear();
        Some(format!("\n\n{}\n\n", lines.join("\n")))
    })
}

fn emphasis<N: DomNode + 'static>() -> Rule<N> {
    Rule::new(
        "emphasis",
        |n: &N, _| n.has_tag("em") || n.has_tag("i"),
        |content, _n, o| {
            if content.trim().is_empty() {
                String::new()
            } else {
                let d = o.emphasis_delimiter.as_str();
                format!("{d}{content}{d}")
            }
        },
    )
}

fn strong<N: DomNode + 'static>() -> Rule<N> {
    Rule::new(
        "strong",
        |n: &N, _| n.has_tag("strong") || n.has_tag("b"),
        |content, _n, o| {
            if content.trim().is_empty() {
                String::new()
            } else {
                let d = o.strong_delimiter.as_str();
                format!("{d}{content}{d}")
            }
        },
    )
}

fn inline_code<N: DomNode + 'static>() -> Rule<N> {
    Rule::new(
        "inline-code",
        |n: &N, _| n.has_tag("code") && !is_alone_in_pre(n),
        |content, _n, _o| {
            let collapsed = content.replace("\r\n", "\n").replace(['\r', '\n'], " ");
            let longest_run = longest_backtick_run(&collapsed);
            let fence_len = longest_run + 1;
            let fence = "`".repeat(fence_len.max(1));
            let needs_pad = collapsed.starts_with('`')
                || collapsed.ends_with('`')
                || (collapsed.starts_with(' ') && collapsed.ends_with(' ') && !collapsed.trim().is_empty());
            if needs_pad {
                format!("{fence} {collapsed} {fence}")
            } else {
                format!("{fence}{collapsed}{fence}")
            }
        },
    )
}

fn longest_backtick_run(s: &str) -> usize {
    let mut max = 0;
    let mut cur = 0;
    for c in s.chars() {
        if c == '`' {
            cur += 1;
            max = max.max(cur);
        } else {
            cur = 0;
        }
    }
    max
}

fn image<N: DomNode + 'static>() -> Rule<N> {
    Rule::new(
        "image",
        |n: &N, _| n.has_tag("img"),
        |_content, node, o| {
            let src = node.attribute("src");
            if src.is_empty() {
                return String::new();
            }
            let alt = node.attribute("alt").replace(['\n', '\r'], " ");
            let alt = (o.escape)(&alt);
            let title_attr = node.attribute("title");
            let title_part = if title_attr.is_empty() { String::new() } else { format_title(&title_attr) };
            format!("![{alt}]({}{title_part})", escape_href_parens(&o.resolve_url(&src)))
        },
    )
}

// --- shared helpers -------------------------------------------------------

fn code_child<N: DomNode>(node: &N) -> Option<N> {
    node.children().into_iter().find(|c| c.has_tag("code"))
}

fn is_alone_in_pre<N: DomNode>(node: &N) -> bool {
    match node.parent() {
        Some(p) if p.has_tag("pre") => p.children().len() == 1,
        _ => false,
    }
}

fn next_element_sibling<N: DomNode>(node: &N) -> Option<N> {
    use crate::dom::NodeType;
    let mut cur = node.next_sibling();
    while let Some(n) = cur {
        if n.node_type() == NodeType::Element {
            return Some(n);
        }
        cur = n.next_sibling();
    }
    None
}

fn is_last_element_child<N: DomNode>(node: &N, parent: &N) -> bool {
    use crate::dom::NodeType;
    let elements: Vec<N> = parent.children().into_iter().filter(|c| c.node_type() == NodeType::Element).collect();
    elements.last().is_some_and(|last| last.id() == node.id())
}

fn index_among_element_siblings<N: DomNode>(node: &N, parent: &N) -> usize {
    use crate::dom::NodeType;
    parent
        .children()
        .into_iter()
        .filter(|c| c.node_type() == NodeType::Element)
        .position(|c| c.id() == node.id())
        .unwrap_or(0)
}

fn indent_continuation_lines(content: &str) -> String {
    let mut lines = content.split('\n');
    let mut out = lines.next().unwrap_or("").to_string();
    for line in lines {
        out.push('\n');
        out.push_str("    ");
        out.push_str(line);
    }
    out
}
