// Regression tests — every bug found in this engine becomes a test case here.
// Never delete a test from this file.

use html2markdown::convert;
use pretty_assertions::assert_eq;

/// Image alt text containing `]` must be escaped to prevent premature bracket
/// close in the `![alt](url)` syntax.
#[test]
fn image_alt_with_bracket() {
    let md = convert(r#"<img src="foo.png" alt="a]b">"#).unwrap();
    assert_eq!(md, "![a\\]b](foo.png)");
}

/// Link text containing `]` must be escaped the same way.
#[test]
fn link_text_with_bracket() {
    let md = convert(r#"<a href="http://example.com">foo]bar</a>"#).unwrap();
    assert!(md.contains("foo\\]bar"), "link text ] should be escaped: {md:?}");
}

/// Newlines inside inline code must be replaced with spaces to prevent block
/// constructs from triggering when the markdown is re-parsed.
#[test]
fn inline_code_newline_replaced_with_space() {
    let md = convert("<p>before <code>foo\nbar</code> after</p>").unwrap();
    assert!(md.contains("`foo bar`"), "newline in inline code should become a space: {md:?}");
}

/// Text starting with `1. ` at block start must escape the `.` to prevent
/// ordered-list interpretation.
#[test]
fn ordered_list_marker_escaped_dot() {
    let md = convert("<p>1. foo</p>").unwrap();
    assert_eq!(md, "1\\. foo");
}

/// Multi-digit ordered-list markers are also escaped.
#[test]
fn ordered_list_marker_multi_digit() {
    let md = convert("<p>10. foo</p>").unwrap();
    assert_eq!(md, "10\\. foo");
}

/// Deeply nested HTML must not cause a stack overflow — the reducer recurses
/// one stack frame per DOM depth level.
#[test]
fn deep_nesting_no_stack_overflow() {
    let html = "<div>".repeat(2000) + "deep text" + &"</div>".repeat(2000);
    let md = convert(&html).unwrap();
    assert!(md.contains("deep text"));
}

/// A `<pre>` with no `<code>` child is not recognized by the code-block rule
/// and falls through to the default block replacement, preserving its text.
#[test]
fn pre_without_code_child_falls_through() {
    let md = convert("<pre>raw preformatted</pre>").unwrap();
    assert!(md.contains("raw preformatted"));
}

/// An `<a>` with no `href` attribute is not a link per spec §7 — it falls
/// through to the default replacement (text only).
#[test]
fn anchor_without_href_is_text_only() {
    let md = convert("<a>plain text</a>").unwrap();
    assert_eq!(md, "plain text");
}

/// Collapsed reference-link style keys the reference label on link text.
#[test]
fn collapsed_reference_links_share_labels_by_text() {
    use html2markdown::{convert_with, LinkStyle, Options};
    let mut options = Options::default();
    options.link_style = LinkStyle::Referenced;
    options.reference_style = html2markdown::ReferenceStyle::Collapsed;
    let md = convert_with(r#"<a href="http://a.example">same</a>"#, options).unwrap();
    assert!(md.contains("[same][]"));
    assert!(md.contains("[same]: http://a.example"));
}
