//! `scraper`-backed implementation of [`MarkupNode`].

use scraper::{ElementRef, Html, Node};

use super::{MarkupNode, Query};

/// A parsed HTML page.
#[derive(Debug)]
pub struct HtmlDocument {
    html: Html,
}

impl HtmlDocument {
    /// Parses a full HTML document. Parsing never fails; malformed markup is
    /// repaired the way browsers do.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
        }
    }

    /// The `<html>` element.
    #[must_use]
    pub fn root(&self) -> HtmlNode<'_> {
        HtmlNode::new(self.html.root_element())
    }
}

/// An element of an [`HtmlDocument`], possibly with some descendant
/// subtrees hidden.
#[derive(Debug, Clone)]
pub struct HtmlNode<'a> {
    element: ElementRef<'a>,
    hidden: Vec<ElementRef<'a>>,
}

impl<'a> HtmlNode<'a> {
    fn new(element: ElementRef<'a>) -> Self {
        Self {
            element,
            hidden: Vec::new(),
        }
    }

    fn is_hidden(&self, element: ElementRef<'a>) -> bool {
        self.hidden.contains(&element)
    }

    fn collect_visible(&self, parent: ElementRef<'a>, out: &mut Vec<ElementRef<'a>>) {
        for child in parent.children().filter_map(ElementRef::wrap) {
            if self.is_hidden(child) {
                continue;
            }
            out.push(child);
            self.collect_visible(child, out);
        }
    }

    fn first_visible(&self, parent: ElementRef<'a>, query: &Query) -> Option<Self> {
        for child in parent.children().filter_map(ElementRef::wrap) {
            if self.is_hidden(child) {
                continue;
            }
            let node = self.with_element(child);
            if query.matches(&node) {
                return Some(node);
            }
            if let Some(found) = self.first_visible(child, query) {
                return Some(found);
            }
        }
        None
    }

    fn push_text(&self, parent: ElementRef<'a>, out: &mut String) {
        for child in parent.children() {
            match child.value() {
                Node::Text(text) => out.push_str(text),
                Node::Element(_) => {
                    if let Some(element) = ElementRef::wrap(child) {
                        if !self.is_hidden(element) {
                            self.push_text(element, out);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn with_element(&self, element: ElementRef<'a>) -> Self {
        Self {
            element,
            hidden: self.hidden.clone(),
        }
    }
}

impl MarkupNode for HtmlNode<'_> {
    fn tag(&self) -> &str {
        self.element.value().name()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(self.element, &mut out);
        out
    }

    fn own_text(&self) -> String {
        self.element
            .children()
            .filter_map(|child| match child.value() {
                Node::Text(text) => Some(&**text),
                _ => None,
            })
            .collect()
    }

    fn parent(&self) -> Option<Self> {
        self.element
            .parent()
            .and_then(ElementRef::wrap)
            .map(|element| self.with_element(element))
    }

    fn find_all(&self, query: &Query) -> Vec<Self> {
        let mut visible = Vec::new();
        self.collect_visible(self.element, &mut visible);
        visible
            .into_iter()
            .map(|element| self.with_element(element))
            .filter(|node| query.matches(node))
            .collect()
    }

    fn find_first(&self, query: &Query) -> Option<Self> {
        self.first_visible(self.element, query)
    }

    fn without(&self, query: &Query) -> Self {
        let mut hidden = self.hidden.clone();
        hidden.extend(self.find_all(query).into_iter().map(|node| node.element));
        Self {
            element: self.element,
            hidden,
        }
    }
}
