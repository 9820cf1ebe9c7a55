//! Display-name extraction from series index pages.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::markup::{MarkupNode, Query};
use crate::record::Designation;

/// Outcome of a name lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameResolution {
    /// The display name, if a listing was found.
    pub name: Option<String>,
    /// Set when the listing label could not be separated from the name; the
    /// name then holds the whole trimmed listing text.
    pub anomalous: bool,
}

impl NameResolution {
    /// A resolution with no name.
    #[must_use]
    pub fn not_found() -> Self {
        Self::default()
    }
}

/// Reads an entry's display name from the index page listing it.
#[derive(Debug, Clone)]
pub struct NameResolver {
    dashes_in_listing: usize,
}

impl NameResolver {
    /// Creates a resolver that strips `dashes_in_listing` label segments.
    #[must_use]
    pub const fn new(dashes_in_listing: usize) -> Self {
        Self { dashes_in_listing }
    }

    /// Finds the listing for `designation` under `index` and returns the name
    /// it carries.
    pub fn resolve<N: MarkupNode>(&self, index: &N, designation: &Designation) -> NameResolution {
        let Some(link) = find_listing(index, designation) else {
            debug!(designation = %designation, "No listing found on series index");
            return NameResolution::not_found();
        };

        let container = link.parent().unwrap_or(link).without(&Query::strikethrough());
        let (name, anomalous) = strip_listing_label(&container.text(), self.dashes_in_listing);
        debug!(designation = %designation, name = %name, anomalous, "Resolved listing name");

        NameResolution {
            name: Some(name),
            anomalous,
        }
    }
}

/// Locates the hyperlink for `designation`: first a link whose path is
/// exactly `/scp-<designation>`, then the only link whose target mentions the
/// designation at all.
fn find_listing<N: MarkupNode>(index: &N, designation: &Designation) -> Option<N> {
    let escaped = regex::escape(designation.as_str());

    let exact = Regex::new(&format!(r"(?i)^(?:https?://[^/]+)?/scp-{escaped}/?$")).ok()?;
    if let Some(link) = index.find_first(&Query::link_to(exact)) {
        return Some(link);
    }

    let loose = Regex::new(&format!("(?i){escaped}")).ok()?;
    let mut candidates = index.find_all(&Query::link_to(loose));
    if candidates.len() == 1 {
        candidates.pop()
    } else {
        debug!(
            designation = %designation,
            candidates = candidates.len(),
            "Listing link is missing or ambiguous"
        );
        None
    }
}

/// Removes `dashes` leading label segments from a listing such as
/// `SCP-173 - The Sculpture`. The first segment ends at a bare `-`, later
/// ones at ` - `.
///
/// Returns the trimmed remainder and whether a separator was missing before
/// all segments were stripped.
#[must_use]
pub fn strip_listing_label(listing: &str, dashes: usize) -> (String, bool) {
    let mut rest = listing;
    let mut separator = "-";
    for _ in 0..dashes {
        match rest.find(separator) {
            Some(index) => rest = &rest[index + separator.len()..],
            None => return (rest.trim().to_string(), true),
        }
        separator = " - ";
    }
    (rest.trim().to_string(), false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::HtmlDocument;

    fn resolve(html: &str, designation: &str) -> NameResolution {
        let doc = HtmlDocument::parse(html);
        let designation = Designation::parse(designation).unwrap();
        NameResolver::new(2).resolve(&doc.root(), &designation)
    }

    #[test]
    fn test_single_loose_link() {
        let result = resolve(r#"<a href="/foo-007">SCP-007 - The Spectacle</a>"#, "007");
        assert_eq!(result.name.as_deref(), Some("The Spectacle"));
        assert!(!result.anomalous);
    }

    #[test]
    fn test_exact_link_preferred_over_loose_matches() {
        let html = r#"<ul>
            <li><a href="/scp-1049">SCP-1049</a> - Tranquil Music</li>
            <li><a href="/scp-049">SCP-049</a> - Plague Doctor</li>
            <li><a href="/scp-049-j">SCP-049-J</a> - Doctor Doctor</li>
        </ul>"#;
        let result = resolve(html, "49");
        assert_eq!(result.name.as_deref(), Some("Plague Doctor"));
    }

    #[test]
    fn test_exact_link_is_case_insensitive() {
        let html = r#"<ul><li><a href="http://www.scp-wiki.net/SCP-173">SCP-173</a> - The Sculpture</li></ul>"#;
        let result = resolve(html, "173");
        assert_eq!(result.name.as_deref(), Some("The Sculpture"));
    }

    #[test]
    fn test_ambiguous_loose_matches() {
        let html = r#"<ul>
            <li><a href="/scp-1049">SCP-1049</a> - Tranquil Music</li>
            <li><a href="/scp-2049">SCP-2049</a> - Something Else</li>
        </ul>"#;
        assert_eq!(resolve(html, "049"), NameResolution::not_found());
    }

    #[test]
    fn test_missing_listing() {
        let html = r#"<ul><li><a href="/scp-002">SCP-002</a> - The "Living" Room</li></ul>"#;
        assert_eq!(resolve(html, "003"), NameResolution::not_found());
    }

    #[test]
    fn test_strikethrough_removed() {
        let html = r#"<ul><li><a href="/scp-1234">SCP-1234</a> - <span style="text-decoration: line-through;">Old Name</span> New Name</li></ul>"#;
        let result = resolve(html, "1234");
        assert_eq!(result.name.as_deref(), Some("New Name"));
    }

    #[test]
    fn test_single_segment_label_is_anomalous() {
        let html = r#"<ul><li><a href="/scp-1234">SCP-1234 The Unlabelled</a></li></ul>"#;
        let result = resolve(html, "1234");
        assert_eq!(result.name.as_deref(), Some("1234 The Unlabelled"));
        assert!(result.anomalous);
    }

    #[test]
    fn test_no_dash_is_anomalous() {
        let html = r#"<ul><li><a href="/scp-2565">Allison Eckhart</a></li></ul>"#;
        let result = resolve(html, "2565");
        assert_eq!(result.name.as_deref(), Some("Allison Eckhart"));
        assert!(result.anomalous);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let html = r#"<ul><li><a href="/scp-1234">SCP-1234</a> - <span style="text-decoration: line-through;">Old</span> New</li></ul>"#;
        let doc = HtmlDocument::parse(html);
        let designation = Designation::parse("1234").unwrap();
        let resolver = NameResolver::new(2);

        let first = resolver.resolve(&doc.root(), &designation);
        let second = resolver.resolve(&doc.root(), &designation);
        assert_eq!(first, second);
    }

    #[test]
    fn test_strip_listing_label() {
        assert_eq!(
            strip_listing_label("SCP-173 - The Sculpture", 2),
            ("The Sculpture".to_string(), false)
        );
        assert_eq!(
            strip_listing_label("SCP-001 - Proposal - Dr. Gears", 2),
            ("Proposal - Dr. Gears".to_string(), false)
        );
        assert_eq!(
            strip_listing_label("  Plain text  ", 2),
            ("Plain text".to_string(), true)
        );
        assert_eq!(
            strip_listing_label("SCP-173 - The Sculpture", 0),
            ("SCP-173 - The Sculpture".to_string(), false)
        );
    }
}
