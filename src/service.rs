// The conversion facade (spec §6: external interfaces).
//
// Wires `html_dom::parse`, `whitespace::collapse`, `reduce::reduce`, and
// `reduce::post_process` into one call, and owns the `RuleSet` a caller can
// customize with `add_rule`/`keep`/`remove` before converting — mirroring
// how the teacher's `TransformOptions`/`StringifyOptions` pair was threaded
// through `hast_to_mdast::transform` and `stringify::stringify`.

use crate::error::HtmlToMarkdownError;
use crate::html_dom::{self, HtmlNode};
use crate::options::Options;
use crate::reduce;
use crate::rules::{Rule, RuleSet, TagFilter};
use crate::whitespace;

/// A reusable HTML-to-Markdown converter.
///
/// Construct one, customize its rule set, and call `convert` as many times
/// as needed — each call parses and reduces independently (spec §5: the
/// engine is single-threaded and carries no state across calls other than
/// what's configured here).
pub struct Service {
    options: Options<HtmlNode>,
    rules: RuleSet<HtmlNode>,
}

impl Service {
    pub fn new() -> Self {
        Self { options: Options::default(), rules: RuleSet::new() }
    }

    pub fn with_options(options: Options<HtmlNode>) -> Self {
        Self { options, rules: RuleSet::new() }
    }

    pub fn options(&self) -> &Options<HtmlNode> {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut Options<HtmlNode> {
        &mut self.options
    }

    /// Register a user rule; newest rules take precedence over both earlier
    /// user rules and every built-in rule (spec §4.4).
    pub fn add_rule(&mut self, rule: Rule<HtmlNode>) -> &mut Self {
        self.rules.add_rule(rule);
        self
    }

    /// Force elements matching `filter` to be kept as raw HTML.
    pub fn keep(&mut self, filter: TagFilter<HtmlNode>) -> &mut Self {
        self.rules.keep(filter);
        self
    }

    /// Force elements matching `filter` to be dropped entirely.
    pub fn remove(&mut self, filter: TagFilter<HtmlNode>) -> &mut Self {
        self.rules.remove(filter);
        self
    }

    /// Convert an HTML string to Markdown.
    ///
    /// `html5ever`'s parser applies the HTML5 error-recovery algorithm and
    /// always produces a tree, so the `Parse` variant of
    /// `HtmlToMarkdownError` is currently unreachable through this adapter;
    /// the `Result` return stays part of the contract (spec §7) for parser
    /// collaborators that can fail.
    pub fn convert(&self, html: &str) -> Result<String, HtmlToMarkdownError> {
        let root = html_dom::parse(html);
        let collapsed = whitespace::collapse(&root, self.options.preformatted_code);
        let body = reduce::reduce(&root, &self.rules, &self.options, &collapsed);
        Ok(reduce::post_process(body, &self.rules, &self.options))
    }
}

impl Default for Service {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_simple_paragraph() {
        let md = Service::new().convert("<p>Hello, world!</p>").unwrap();
        assert_eq!(md, "Hello, world!");
    }

    #[test]
    fn user_rule_overrides_builtin() {
        let mut service = Service::new();
        service.add_rule(Rule::new("shout", |n: &HtmlNode, _| n.has_tag("p"), |c, _n, _o| c.to_uppercase()));
        let md = service.convert("<p>hi</p>").unwrap();
        assert_eq!(md, "HI");
    }

    #[test]
    fn keep_preserves_raw_html() {
        let mut service = Service::new();
        service.keep(TagFilter::Tag("video".to_string()));
        let md = service.convert(r#"<video src="a.mp4"></video>"#).unwrap();
        assert_eq!(md, r#"<video src="a.mp4"></video>"#);
    }
}
