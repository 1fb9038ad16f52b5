// Escape discipline (spec §4.6).
//
// Two escape functions, selectable via `Options::escape`. Text inside
// `<code>` is never escaped — the reducer (`reduce::reduce`) checks
// `classify::has_code_ancestor` before calling either of these.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_HASH_HEADING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#{1,6} ").unwrap());
static LEADING_ORDERED_LIST: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)(\. )").unwrap());
static LEADING_EQUALS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^=+").unwrap());

/// The default escape function (spec §4.6, steps 1-12, applied in order).
pub fn advanced_escape(text: &str) -> String {
    let mut s = text.to_string();

    s = s.replace('\\', "\\\\");
    s = s.replace('*', "\\*");

    if s.starts_with('-') {
        s.insert(0, '\\');
    }
    if s.starts_with("+ ") {
        s.insert(0, '\\');
    }
    if LEADING_EQUALS.is_match(&s) {
        s.insert(0, '\\');
    }
    if LEADING_HASH_HEADING.is_match(&s) {
        s.insert(0, '\\');
    }

    s = s.replace('`', "\\`");

    if s.starts_with("~~~") {
        s.insert(0, '\\');
    }

    s = s.replace('[', "\\[");
    s = s.replace(']', "\\]");

    if s.starts_with('>') {
        s.insert(0, '\\');
    }

    s = s.replace('_', "\\_");

    if let Some(caps) = LEADING_ORDERED_LIST.captures(&s) {
        let digits_end = caps.get(1).unwrap().end();
        s.insert(digits_end, '\\');
    }

    s
}

/// The minimal escape function: escapes only `\`, `[`, `]`.
pub fn minimal_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '[' | ']' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_backslash_first() {
        assert_eq!(advanced_escape("a\\b"), "a\\\\b");
    }

    #[test]
    fn escapes_asterisk() {
        assert_eq!(advanced_escape("a*b"), "a\\*b");
    }

    #[test]
    fn escapes_leading_dash() {
        assert_eq!(advanced_escape("-item"), "\\-item");
        assert_eq!(advanced_escape("a-b"), "a-b");
    }

    #[test]
    fn escapes_leading_plus_space() {
        assert_eq!(advanced_escape("+ item"), "\\+ item");
        assert_eq!(advanced_escape("+item"), "+item");
    }

    #[test]
    fn escapes_leading_equals_run() {
        assert_eq!(advanced_escape("=== header"), "\\=== header");
    }

    #[test]
    fn escapes_leading_atx_heading() {
        assert_eq!(advanced_escape("# heading"), "\\# heading");
        assert_eq!(advanced_escape("###### heading"), "\\###### heading");
        assert_eq!(advanced_escape("####### too many"), "####### too many");
    }

    #[test]
    fn escapes_backtick() {
        assert_eq!(advanced_escape("a`b"), "a\\`b");
    }

    #[test]
    fn escapes_leading_tilde_fence() {
        assert_eq!(advanced_escape("~~~code"), "\\~~~code");
    }

    #[test]
    fn escapes_brackets() {
        assert_eq!(advanced_escape("[a](b)"), "\\[a\\](b)");
    }

    #[test]
    fn escapes_leading_blockquote() {
        assert_eq!(advanced_escape(">quote"), "\\>quote");
    }

    #[test]
    fn escapes_underscore() {
        assert_eq!(advanced_escape("a_b_c"), "a\\_b\\_c");
    }

    #[test]
    fn escapes_leading_ordered_list_marker() {
        assert_eq!(advanced_escape("1. item"), "1\\. item");
        assert_eq!(advanced_escape("42. item"), "42\\. item");
        assert_eq!(advanced_escape("1.item"), "1.item");
    }

    #[test]
    fn minimal_escape_is_a_subsequence() {
        let input = "a[b]c\\d";
        let escaped = minimal_escape(input);
        let mut chars = escaped.chars();
        for c in input.chars() {
            assert!(chars.by_ref().any(|e| e == c), "{c} missing from {escaped}");
        }
    }

    #[test]
    fn minimal_escape_leaves_other_chars_alone() {
        assert_eq!(minimal_escape("*_`#"), "*_`#");
    }
}
