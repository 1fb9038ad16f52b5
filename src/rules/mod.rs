// Rule set and rule-matching machinery (spec §4.4).
//
// Ordered containers of `Rule`s, searched in the fixed precedence order
// spec §4.4 specifies, plus the three distinguished rules (blank, keep,
// default) that always exist and are customizable through `Options`.

pub mod commonmark;

use std::rc::Rc;

use crate::classify;
use crate::dom::DomNode;
use crate::options::Options;

/// `(node, options) -> bool`. Must be side-effect-free (spec §3 "Rule").
pub type RuleFilter<N> = Rc<dyn Fn(&N, &Options<N>) -> bool>;

/// `(content, node, options) -> markdown`.
pub type RuleReplacement<N> = Rc<dyn Fn(&str, &N, &Options<N>) -> String>;

/// `(options) -> Option<trailer>`, invoked once per conversion after the
/// reducer finishes (spec §4.8). Rules with per-conversion state (the
/// reference-link accumulator) clear that state here.
pub type RuleAppend<N> = Rc<dyn Fn(&Options<N>) -> Option<String>>;

#[derive(Clone)]
pub struct Rule<N: DomNode> {
    pub key: &'static str,
    pub filter: RuleFilter<N>,
    pub replacement: RuleReplacement<N>,
    pub append: Option<RuleAppend<N>>,
}

impl<N: DomNode + 'static> Rule<N> {
    pub fn new(
        key: &'static str,
        filter: impl Fn(&N, &Options<N>) -> bool + 'static,
        replacement: impl Fn(&str, &N, &Options<N>) -> String + 'static,
    ) -> Self {
        Self { key, filter: Rc::new(filter), replacement: Rc::new(replacement), append: None }
    }

    pub fn with_append(mut self, append: impl Fn(&Options<N>) -> Option<String> + 'static) -> Self {
        self.append = Some(Rc::new(append));
        self
    }

    fn matches(&self, node: &N, options: &Options<N>) -> bool {
        (self.filter)(node, options)
    }
}

/// A single tag name, a set of tag names, or an arbitrary predicate — the
/// three shapes keep/remove filters accept (spec §4.4).
pub enum TagFilter<N: DomNode> {
    Tag(String),
    Tags(Vec<String>),
    Predicate(Rc<dyn Fn(&N) -> bool>),
}

impl<N: DomNode + 'static> TagFilter<N> {
    fn matches(&self, node: &N) -> bool {
        match self {
            TagFilter::Tag(t) => node.has_tag(t),
            TagFilter::Tags(ts) => ts.iter().any(|t| node.has_tag(t)),
            TagFilter::Predicate(p) => p(node),
        }
    }
}

/// The ordered rule containers plus the three distinguished rules.
pub struct RuleSet<N: DomNode> {
    pub user_rules: Vec<Rule<N>>,
    pub builtin_rules: Vec<Rule<N>>,
    keep_filters: Vec<TagFilter<N>>,
    remove_filters: Vec<TagFilter<N>>,
}

/// The outcome of resolving a rule for a node: which list it came from, so
/// the reducer can bypass the normal replacement call for remove rules
/// (which always emit empty) without a wasted closure invocation.
pub enum Resolution<'a, N: DomNode> {
    Blank,
    Matched(&'a Rule<N>),
    Keep,
    Remove,
    Default,
}

impl<N: DomNode + 'static> RuleSet<N> {
    pub fn new() -> Self {
        Self {
            user_rules: Vec::new(),
            builtin_rules: commonmark::build(),
            keep_filters: Vec::new(),
            remove_filters: Vec::new(),
        }
    }

    /// Add a user rule; newest rules take precedence (spec §4.4: "newest at
    /// front"), so this inserts at index 0.
    pub fn add_rule(&mut self, rule: Rule<N>) {
        self.user_rules.insert(0, rule);
    }

    pub fn keep(&mut self, filter: TagFilter<N>) {
        self.keep_filters.push(filter);
    }

    pub fn remove(&mut self, filter: TagFilter<N>) {
        self.remove_filters.push(filter);
    }

    /// Resolve the one rule that applies to `node` (spec §4.4 "Resolution
    /// for a node"): blank first (unless void), then user rules, then
    /// built-ins, then keep filters, then remove filters, then default.
    pub fn resolve(&self, node: &N, options: &Options<N>) -> Resolution<'_, N> {
        if !classify::is_void(node) && classify::is_blank(node) {
            #[cfg(feature = "tracing")]
            tracing::trace!(tag = node.tag_name().unwrap_or(""), "node is blank");
            return Resolution::Blank;
        }
        for rule in self.user_rules.iter().chain(self.builtin_rules.iter()) {
            if rule.matches(node, options) {
                #[cfg(feature = "tracing")]
                tracing::debug!(tag = node.tag_name().unwrap_or(""), rule = rule.key, "rule matched");
                return Resolution::Matched(rule);
            }
        }
        if self.keep_filters.iter().any(|f| f.matches(node)) {
            return Resolution::Keep;
        }
        if self.remove_filters.iter().any(|f| f.matches(node)) {
            return Resolution::Remove;
        }
        Resolution::Default
    }

    /// Iterate every built-in rule's `append` in registration order (spec
    /// §4.8: "the append order of rules is the iteration order of the rule
    /// list"). User rules may also register an append.
    pub fn appends<'a>(&'a self, options: &'a Options<N>) -> impl Iterator<Item = String> + 'a {
        self.user_rules
            .iter()
            .chain(self.builtin_rules.iter())
            .filter_map(move |r| r.append.as_ref().and_then(|a| a(options)))
    }
}

impl<N: DomNode + 'static> Default for RuleSet<N> {
    fn default() -> Self {
        Self::new()
    }
}
