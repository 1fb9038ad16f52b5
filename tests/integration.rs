// End-to-end API tests for html2markdown.

use html2markdown::{convert, convert_with, HeadingStyle, Options};
use pretty_assertions::assert_eq;

#[test]
fn empty_input() {
    assert_eq!(convert("").unwrap(), "");
}

#[test]
fn plain_text_survives() {
    let result = convert("Hello, world!").unwrap();
    assert!(result.contains("Hello, world!"));
}

#[test]
fn options_are_applied() {
    let mut options = Options::default();
    options.heading_style = HeadingStyle::Atx;
    let result = convert_with("<h1>Title</h1>", options).unwrap();
    assert_eq!(result, "# Title");
}

#[test]
fn document_with_head_and_body() {
    let html = "<html><head><title>t</title></head><body><p>Hello</p></body></html>";
    let result = convert(html).unwrap();
    assert_eq!(result, "Hello");
}

#[test]
fn nested_blockquote_and_list() {
    let html = "<blockquote><p>Quoted</p><ul><li>One</li><li>Two</li></ul></blockquote>";
    let result = convert(html).unwrap();
    assert_eq!(result, "> Quoted\n> \n> *   One\n> *   Two");
}

#[test]
fn table_falls_through_to_default_block() {
    // spec's CommonMark rule set has no table rule, so a <table> is handled
    // by the default block replacement — its rows still produce readable text.
    let html = "<table><tr><td>a</td><td>b</td></tr></table>";
    let result = convert(html).unwrap();
    assert!(result.contains('a') && result.contains('b'));
}

#[test]
fn base_url_resolves_relative_links() {
    let mut options = Options::default();
    options.base_url = Some("https://example.com/docs/".to_string());
    let result = convert_with(r#"<a href="page.html">link</a>"#, options).unwrap();
    assert_eq!(result, "[link](https://example.com/docs/page.html)");
}

#[test]
fn keep_tags_preserve_raw_html() {
    let mut options = Options::default();
    options.keep_tags.insert("video".to_string());
    let result = convert_with(r#"<video src="a.mp4"></video>"#, options).unwrap();
    assert_eq!(result, r#"<video src="a.mp4"></video>"#);
}
