// Conversion options (spec §3 "Options" table).
//
// Grouped like the teacher's `StringifyOptions`/`Options` split (see
// `stringify::StringifyOptions`), but flattened into one record since this
// engine has no separate AST-serialization stage: one `Options` value
// configures rule matching, the collapser-adjacent behaviors, and escaping.

use std::collections::HashSet;
use std::rc::Rc;

use crate::dom::DomNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadingStyle {
    #[default]
    Setext,
    Atx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletMarker {
    #[default]
    Asterisk,
    Dash,
    Plus,
}

impl BulletMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            BulletMarker::Asterisk => "*",
            BulletMarker::Dash => "-",
            BulletMarker::Plus => "+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodeBlockStyle {
    #[default]
    Indented,
    Fenced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FenceLiteral {
    #[default]
    Backtick,
    Tilde,
}

impl FenceLiteral {
    pub fn char(self) -> char {
        match self {
            FenceLiteral::Backtick => '`',
            FenceLiteral::Tilde => '~',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmphasisDelimiter {
    #[default]
    Underscore,
    Asterisk,
}

impl EmphasisDelimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            EmphasisDelimiter::Underscore => "_",
            EmphasisDelimiter::Asterisk => "*",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrongDelimiter {
    #[default]
    Asterisk,
    Underscore,
}

impl StrongDelimiter {
    pub fn as_str(self) -> &'static str {
        match self {
            StrongDelimiter::Asterisk => "**",
            StrongDelimiter::Underscore => "__",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStyle {
    #[default]
    Inlined,
    Referenced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceStyle {
    #[default]
    Full,
    Collapsed,
    Shortcut,
}

/// A `(content, node) -> text` replacement used for the blank/keep/default
/// rules. Boxed as `Rc<dyn Fn>` (not `Send`) since the engine is explicitly
/// single-threaded (spec §5).
pub type NodeReplacement<N> = Rc<dyn Fn(&str, &N) -> String>;

/// `text -> text`, the shape of `Options::escape`.
pub type EscapeFn = Rc<dyn Fn(&str) -> String>;

/// Conversion options (spec §3).
#[derive(Clone)]
pub struct Options<N: DomNode> {
    pub heading_style: HeadingStyle,
    pub horizontal_rule: String,
    pub bullet_marker: BulletMarker,
    pub code_block_style: CodeBlockStyle,
    pub fence_literal: FenceLiteral,
    pub emphasis_delimiter: EmphasisDelimiter,
    pub strong_delimiter: StrongDelimiter,
    pub link_style: LinkStyle,
    pub reference_style: ReferenceStyle,
    pub line_break_literal: String,
    /// When set, a `<code>` element is treated as a preformatted boundary
    /// the same way `<pre>` already is (spec §4.2, §4.3): the whitespace
    /// collapser skips descent into it and never collapses its text, and
    /// the flanking analyzer never hoists whitespace out of it.
    pub preformatted_code: bool,
    pub escape: EscapeFn,
    pub keep_tags: HashSet<String>,
    pub blank_replacement: NodeReplacement<N>,
    pub keep_replacement: NodeReplacement<N>,
    pub default_replacement: NodeReplacement<N>,
    /// Supplemental (spec.md is silent; see SPEC_FULL.md §4): base URL to
    /// resolve relative `href`/`src` values against before formatting.
    pub base_url: Option<String>,
}

impl<N: DomNode + 'static> Default for Options<N> {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Setext,
            horizontal_rule: "* * *".to_string(),
            bullet_marker: BulletMarker::Asterisk,
            code_block_style: CodeBlockStyle::Indented,
            fence_literal: FenceLiteral::Backtick,
            emphasis_delimiter: EmphasisDelimiter::Underscore,
            strong_delimiter: StrongDelimiter::Asterisk,
            link_style: LinkStyle::Inlined,
            reference_style: ReferenceStyle::Full,
            line_break_literal: "  ".to_string(),
            preformatted_code: false,
            escape: Rc::new(crate::escape::advanced_escape),
            keep_tags: HashSet::new(),
            blank_replacement: Rc::new(|_content, node| {
                if crate::classify::is_block(node) { "\n\n".to_string() } else { String::new() }
            }),
            keep_replacement: Rc::new(|_content, node| crate::reduce::serialize_as_html(node)),
            default_replacement: Rc::new(|content, node| {
                if crate::classify::is_block(node) {
                    format!("\n\n{content}\n\n")
                } else {
                    content.to_string()
                }
            }),
            base_url: None,
        }
    }
}

impl<N: DomNode + 'static> Options<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a possibly-relative URL against `base_url`, if set. Falls
    /// back to the raw value when there is no base or it fails to parse
    /// (spec §7: malformed input degrades gracefully, never panics).
    pub fn resolve_url(&self, raw: &str) -> String {
        let Some(base) = &self.base_url else { return raw.to_string() };
        let Ok(base) = url::Url::parse(base) else { return raw.to_string() };
        match base.join(raw) {
            Ok(joined) => joined.to_string(),
            Err(_) => raw.to_string(),
        }
    }
}
