// html2markdown — convert HTML fragments and documents into
// CommonMark-compatible Markdown.
//
// Pipeline: parse HTML into a DOM tree (`html_dom`), run the whitespace
// collapser (`whitespace`) that simulates a browser's inline-whitespace
// rendering, then recursively reduce the tree to a Markdown string
// (`reduce`) by resolving each element against a `RuleSet` (`rules`) and
// hoisting flanking whitespace (`flanking`) outside each rule's output.
// `classify` holds the pure tag-classification predicates the other stages
// share, and `escape` holds the Markdown-special-character escaping applied
// to text outside `<code>`.
//
// The DOM itself is an external collaborator: the engine only requires a
// `dom::DomNode` implementation, never a concrete parser. `html_dom` is the
// `html5ever`/`markup5ever_rcdom` adapter `Service` uses by default.

pub mod classify;
pub mod dom;
pub mod error;
pub mod escape;
pub mod flanking;
pub mod html_dom;
pub mod options;
pub mod reduce;
pub mod rules;
mod service;
pub mod whitespace;

pub use dom::DomNode;
pub use error::HtmlToMarkdownError;
pub use html_dom::HtmlNode;
pub use options::{
    BulletMarker, CodeBlockStyle, EmphasisDelimiter, FenceLiteral, HeadingStyle, LinkStyle,
    Options, ReferenceStyle, StrongDelimiter,
};
pub use rules::{Rule, RuleSet, TagFilter};
pub use service::Service;

/// Convert an HTML string to Markdown using default options.
///
/// # Examples
///
/// ```
/// let md = html2markdown::convert("<h1>Hello</h1><p>World</p>").unwrap();
/// assert!(md.contains("Hello"));
/// ```
pub fn convert(html: &str) -> Result<String, HtmlToMarkdownError> {
    Service::new().convert(html)
}

/// Convert an HTML string to Markdown with custom options.
///
/// # Examples
///
/// ```
/// use html2markdown::{convert_with, Options, HeadingStyle};
///
/// let mut options = Options::default();
/// options.heading_style = HeadingStyle::Atx;
/// let md = convert_with("<h1>Hello</h1>", options).unwrap();
/// assert_eq!(md, "# Hello");
/// ```
pub fn convert_with(html: &str, options: Options<HtmlNode>) -> Result<String, HtmlToMarkdownError> {
    Service::with_options(options).convert(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_empty_is_empty() {
        assert_eq!(convert("").unwrap(), "");
    }

    #[test]
    fn convert_simple_paragraph() {
        assert_eq!(convert("<p>Hello, world!</p>").unwrap(), "Hello, world!");
    }

    #[test]
    fn convert_heading_default_is_setext() {
        let md = convert("<h1>Title</h1>").unwrap();
        assert_eq!(md, "Title\n=====");
    }

    #[test]
    fn convert_with_atx_heading() {
        let mut options = Options::default();
        options.heading_style = HeadingStyle::Atx;
        let md = convert_with("<h2>Title</h2>", options).unwrap();
        assert_eq!(md, "## Title");
    }

    // spec §8 concrete scenarios table.
    #[test]
    fn scenario_bold_and_italic() {
        let md = convert("<p>This is <strong>bold</strong> and <em>italic</em>.</p>").unwrap();
        assert_eq!(md, "This is **bold** and _italic_.");
    }

    #[test]
    fn scenario_nested_list() {
        let md = convert("<ul><li>One</li><li>Two<ul><li>Nested</li></ul></li></ul>").unwrap();
        assert_eq!(md, "*   One\n*   Two\n    *   Nested");
    }

    #[test]
    fn scenario_link() {
        let md = convert(r#"<p><a href="https://example.com">link</a></p>"#).unwrap();
        assert_eq!(md, "[link](https://example.com)");
    }

    #[test]
    fn scenario_code_block() {
        let md = convert("<pre><code>let x = 1;</code></pre>").unwrap();
        assert_eq!(md, "    let x = 1;");
    }

    #[test]
    fn scenario_blank_span_keeps_its_flanking_space() {
        // The span's own content collapses to the blank replacement ("") but
        // the whitespace a browser would still render around it survives as
        // flanking whitespace hoisted outside the (empty) replacement.
        let md = convert("<p>Before<span>   </span>After</p>").unwrap();
        assert_eq!(md, "Before After");
    }

    #[test]
    fn scenario_empty_span_produces_no_gap() {
        let md = convert("<p>Before<span></span>After</p>").unwrap();
        assert_eq!(md, "BeforeAfter");
    }

    #[test]
    fn preformatted_code_option_preserves_internal_whitespace() {
        let collapsed = convert("<code>a   b</code>").unwrap();
        assert_eq!(collapsed, "`a b`");

        let mut options = Options::default();
        options.preformatted_code = true;
        let preserved = convert_with("<code>a   b</code>", options).unwrap();
        assert_eq!(preserved, "`a   b`");
    }
}
