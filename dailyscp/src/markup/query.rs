//! Library-neutral element predicates.

use regex::Regex;

use super::MarkupNode;

/// Predicate on a single attribute value.
#[derive(Debug, Clone)]
pub enum AttrMatch {
    /// The value contains the string, ignoring ASCII case.
    Contains(String),
    /// The whitespace-separated value contains this token.
    Token(String),
    /// The value matches the pattern.
    Pattern(Regex),
}

impl AttrMatch {
    fn matches(&self, value: &str) -> bool {
        match self {
            Self::Contains(needle) => value
                .to_ascii_lowercase()
                .contains(&needle.to_ascii_lowercase()),
            Self::Token(token) => value.split_whitespace().any(|t| t == token),
            Self::Pattern(re) => re.is_match(value),
        }
    }
}

/// Predicate on an element's text.
#[derive(Debug, Clone)]
pub enum TextMatch {
    /// The trimmed full text equals the string.
    Exact(String),
    /// The element's own (direct) text contains the string.
    OwnContains(String),
}

/// Describes the elements a lookup is after: an optional tag name, any
/// number of attribute predicates and an optional text predicate. All of
/// them must hold.
#[derive(Debug, Clone, Default)]
pub struct Query {
    tag: Option<String>,
    attrs: Vec<(String, AttrMatch)>,
    text: Option<TextMatch>,
}

impl Query {
    /// Matches any element.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches elements with the given tag name.
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            tag: Some(name.into()),
            ..Self::default()
        }
    }

    /// Requires an attribute predicate.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, predicate: AttrMatch) -> Self {
        self.attrs.push((name.into(), predicate));
        self
    }

    /// Requires a class token.
    #[must_use]
    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", AttrMatch::Token(class.into()))
    }

    /// Requires the trimmed text to equal `text`.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(TextMatch::Exact(text.into()));
        self
    }

    /// Requires a direct text child containing `needle`.
    #[must_use]
    pub fn with_own_text_containing(mut self, needle: impl Into<String>) -> Self {
        self.text = Some(TextMatch::OwnContains(needle.into()));
        self
    }

    /// Evaluates the query against one node.
    pub fn matches<N: MarkupNode>(&self, node: &N) -> bool {
        if let Some(tag) = &self.tag {
            if !node.tag().eq_ignore_ascii_case(tag) {
                return false;
            }
        }

        let attrs_ok = self.attrs.iter().all(|(name, predicate)| {
            node.attr(name)
                .is_some_and(|value| predicate.matches(value))
        });
        if !attrs_ok {
            return false;
        }

        match &self.text {
            None => true,
            Some(TextMatch::Exact(expected)) => node.text().trim() == expected,
            Some(TextMatch::OwnContains(needle)) => node.own_text().contains(needle.as_str()),
        }
    }

    /// Links (`a[href]`) whose target matches `pattern`.
    #[must_use]
    pub fn link_to(pattern: Regex) -> Self {
        Self::tag("a").with_attr("href", AttrMatch::Pattern(pattern))
    }

    /// Inline spans styled with a line-through, used to mark retracted text.
    #[must_use]
    pub fn strikethrough() -> Self {
        Self::tag("span").with_attr("style", AttrMatch::Contains("line-through".to_string()))
    }

    /// Footnote reference markers.
    #[must_use]
    pub fn footnote_ref() -> Self {
        Self::tag("a").with_class("footnoteref")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_token() {
        let predicate = AttrMatch::Token("block-right".to_string());
        assert!(predicate.matches("scp-image-block block-right"));
        assert!(!predicate.matches("scp-image-block block-right-ish"));
    }

    #[test]
    fn test_attr_contains_ignores_case() {
        let predicate = AttrMatch::Contains("line-through".to_string());
        assert!(predicate.matches("text-decoration: Line-Through;"));
        assert!(!predicate.matches("text-decoration: underline;"));
    }

    #[test]
    fn test_attr_pattern() {
        let predicate = AttrMatch::Pattern(Regex::new("(?i)^/scp-049$").unwrap());
        assert!(predicate.matches("/SCP-049"));
        assert!(!predicate.matches("/scp-0490"));
    }
}
