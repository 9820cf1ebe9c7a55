//! HTML fixtures shaped like the wiki's series index and entry pages.

use super::mocks::StaticFetcher;

/// Index page for the first series.
pub const SERIES_ONE_URL: &str = "http://www.scp-wiki.net/scp-series";

/// Index page for joke entries.
pub const JOKE_INDEX_URL: &str = "http://www.scp-wiki.net/joke-scps";

/// Entry page for SCP-173.
pub const SCULPTURE_URL: &str = "http://www.scp-wiki.net/scp-173";

/// Image shown on SCP-173's page.
pub const SCULPTURE_IMAGE_URL: &str = "http://scp-wiki.wdfiles.com/local--files/scp-173/173.jpg";

/// Bytes served for [`SCULPTURE_IMAGE_URL`].
pub const SCULPTURE_IMAGE_BYTES: &[u8] = b"\xff\xd8\xff\xe0 not really a jpeg";

/// Wraps `body` in a wiki page skeleton.
#[must_use]
pub fn page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>SCP Foundation</title></head><body><div id="main-content"><div id="page-content">{body}</div></div></body></html>"#
    )
}

/// Builds a series index listing each `(href, listing)` pair as
/// `<li><a href>SCP-173</a> - The Sculpture</li>`.
#[must_use]
pub fn series_index(listings: &[(&str, &str)]) -> String {
    let items: String = listings
        .iter()
        .map(|(href, listing)| match listing.split_once(" - ") {
            Some((label, name)) => format!(r#"<li><a href="{href}">{label}</a> - {name}</li>"#),
            None => format!(r#"<li><a href="{href}">{listing}</a></li>"#),
        })
        .collect();
    page(&format!(r#"<div class="content-panel standalone series"><ul>{items}</ul></div>"#))
}

/// Builds an entry page with an object class label, optional image block
/// and tag list.
#[must_use]
pub fn entry_page(object_class: &str, image: Option<&str>, tags: &[&str]) -> String {
    let image_block = image
        .map(|src| {
            format!(
                r#"<div class="scp-image-block block-right" style="width:300px;"><img src="{src}" style="width:300px;" alt="image"/><div class="scp-image-caption" style="width:300px;"><p>Photographed in containment.</p></div></div>"#
            )
        })
        .unwrap_or_default();
    let tag_links: String = tags
        .iter()
        .map(|tag| format!(r#"<a href="/system:page-tags/tag/{tag}">{tag}</a>"#))
        .collect();
    page(&format!(
        r#"{image_block}<p><strong>Item #:</strong> SCP-XXX</p><p><strong>Object Class:</strong> {object_class}</p><p><strong>Special Containment Procedures:</strong> Item is to be kept in a locked container at all times.</p><div class="page-tags"><span>{tag_links}</span></div>"#
    ))
}

/// A fetcher serving SCP-173's index, entry page and image.
#[must_use]
pub fn sculpture_fetcher() -> StaticFetcher {
    StaticFetcher::new()
        .with_page(
            SERIES_ONE_URL,
            series_index(&[
                ("/scp-172", "SCP-172 - Gears"),
                ("/scp-173", "SCP-173 - The Sculpture"),
                ("/scp-174", "SCP-174 - Ventriloquist's Dummy"),
            ]),
        )
        .with_page(
            SCULPTURE_URL,
            entry_page("Euclid", Some(SCULPTURE_IMAGE_URL), &["euclid", "scp", "sculpture"]),
        )
        .with_bytes(SCULPTURE_IMAGE_URL, SCULPTURE_IMAGE_BYTES.to_vec())
}
