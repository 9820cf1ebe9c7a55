//! Representative image lookup.

use crate::markup::{MarkupNode, Query};

/// Finds the floated image block an entry opens with.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageLocator;

impl ImageLocator {
    /// Creates a locator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the `src` of the image inside the first right-floated image
    /// block, if any. The reference is not checked for reachability.
    pub fn locate<N: MarkupNode>(&self, entry: &N) -> Option<String> {
        let block = entry.find_first(
            &Query::tag("div")
                .with_class("scp-image-block")
                .with_class("block-right"),
        )?;
        let image = block.find_first(&Query::tag("img"))?;
        image
            .attr("src")
            .map(str::trim)
            .filter(|src| !src.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::HtmlDocument;

    fn locate(html: &str) -> Option<String> {
        let doc = HtmlDocument::parse(html);
        ImageLocator::new().locate(&doc.root())
    }

    #[test]
    fn test_image_in_block() {
        let html = r#"<div class="scp-image-block block-right" style="width:300px;"><img src="http://scp-wiki.wdfiles.com/local--files/scp-173/173.jpg" alt="173"/><div class="scp-image-caption"><p>SCP-173</p></div></div>"#;
        assert_eq!(
            locate(html).as_deref(),
            Some("http://scp-wiki.wdfiles.com/local--files/scp-173/173.jpg")
        );
    }

    #[test]
    fn test_block_classes_in_either_order() {
        let html = r#"<div class="block-right scp-image-block"><img src="http://example.com/a.jpg"/></div>"#;
        assert_eq!(locate(html).as_deref(), Some("http://example.com/a.jpg"));
    }

    #[test]
    fn test_image_outside_block_ignored() {
        let html = r#"<p><img src="http://example.com/inline.png"/></p>"#;
        assert_eq!(locate(html), None);
    }

    #[test]
    fn test_left_block_ignored() {
        let html = r#"<div class="scp-image-block block-left"><img src="http://example.com/a.png"/></div>"#;
        assert_eq!(locate(html), None);
    }

    #[test]
    fn test_block_without_src() {
        assert_eq!(locate(r#"<div class="scp-image-block block-right"><img alt="x"/></div>"#), None);
        assert_eq!(locate(r#"<div class="scp-image-block block-right"><img src=""/></div>"#), None);
    }
}
