//! Read-only access to parsed HTML.
//!
//! The resolvers never talk to an HTML library directly. They walk documents
//! through [`MarkupNode`], a small capability set (find-first, find-all,
//! plain text, filtered view), and describe what they look for with
//! [`Query`]. [`HtmlDocument`] implements it on top of `scraper`.
//!
//! Cleaning a subtree (dropping strikethrough spans, footnote markers) goes
//! through [`MarkupNode::without`], which returns a view that hides the
//! matching subtrees. The underlying document is never modified, so the same
//! parsed page can be handed to several resolvers.

mod html;
mod query;

pub use html::{HtmlDocument, HtmlNode};
pub use query::{AttrMatch, Query, TextMatch};

/// Capability interface over one element of a parsed document.
pub trait MarkupNode: Clone {
    /// Lower-case tag name.
    fn tag(&self) -> &str;

    /// Value of an attribute, if present.
    fn attr(&self, name: &str) -> Option<&str>;

    /// Concatenated text of every visible descendant text node.
    fn text(&self) -> String;

    /// Concatenated text of the direct text children only.
    fn own_text(&self) -> String;

    /// The enclosing element, carrying over any hidden subtrees.
    fn parent(&self) -> Option<Self>;

    /// All visible descendants matching `query`, in document order.
    fn find_all(&self, query: &Query) -> Vec<Self>;

    /// First visible descendant matching `query`.
    fn find_first(&self, query: &Query) -> Option<Self> {
        self.find_all(query).into_iter().next()
    }

    /// A view of this node with every descendant matching `query` hidden
    /// from traversal and text extraction.
    #[must_use]
    fn without(&self, query: &Query) -> Self;
}
