//! Building entry records from fetched pages.

use std::sync::Arc;
use tracing::debug;

use super::protocols::PageFetcher;
use crate::config::CatalogConfig;
use crate::errors::Result;
use crate::extract::{ClassResolver, ImageLocator, NameResolver, SeriesIndexLocator};
use crate::markup::HtmlDocument;
use crate::record::{source_url_for, Designation, EntryRecord};

/// Resolves designations into [`EntryRecord`]s.
///
/// Pages are fetched asynchronously. Parsing happens in
/// [`assemble`](Self::assemble), which is synchronous and keeps the parsed
/// documents local.
#[derive(Clone)]
pub struct EntryLookup {
    fetcher: Arc<dyn PageFetcher>,
    series: SeriesIndexLocator,
    names: NameResolver,
    classes: ClassResolver,
    images: ImageLocator,
    wiki_base_url: String,
}

impl std::fmt::Debug for EntryLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryLookup")
            .field("series", &self.series)
            .field("wiki_base_url", &self.wiki_base_url)
            .finish_non_exhaustive()
    }
}

impl EntryLookup {
    /// Creates a lookup over `fetcher` for the given catalog.
    #[must_use]
    pub fn new(fetcher: Arc<dyn PageFetcher>, catalog: &CatalogConfig) -> Self {
        Self {
            fetcher,
            series: SeriesIndexLocator::new(catalog),
            names: NameResolver::new(catalog.dashes_in_listing),
            classes: ClassResolver::new(),
            images: ImageLocator::new(),
            wiki_base_url: catalog.wiki_base_url.clone(),
        }
    }

    /// The fetcher pages are read through.
    #[must_use]
    pub fn fetcher(&self) -> &Arc<dyn PageFetcher> {
        &self.fetcher
    }

    /// Fetches the series index and entry page for `designation` and builds
    /// its record.
    ///
    /// Fails without fetching anything when the designation maps to no
    /// series index. Missing fields are left empty on the record.
    pub async fn lookup(&self, designation: &Designation) -> Result<EntryRecord> {
        let index_url = self.series.locate(designation)?;
        let source_url = source_url_for(&self.wiki_base_url, designation);

        let index_html = self.fetcher.fetch_text(index_url).await?;
        let entry_html = self.fetcher.fetch_text(&source_url).await?;

        Ok(self.assemble(designation.clone(), source_url, &index_html, &entry_html))
    }

    /// Builds a record from already-fetched page sources.
    #[must_use]
    pub fn assemble(
        &self,
        designation: Designation,
        source_url: String,
        index_html: &str,
        entry_html: &str,
    ) -> EntryRecord {
        let name = self
            .names
            .resolve(&HtmlDocument::parse(index_html).root(), &designation);

        let entry = HtmlDocument::parse(entry_html);
        let root = entry.root();
        let object_class = self.classes.resolve(&root);
        let image_reference = self.images.locate(&root);

        debug!(
            designation = %designation,
            name = ?name.name,
            object_class = ?object_class,
            has_image = image_reference.is_some(),
            "Assembled entry record"
        );

        EntryRecord::new(designation, source_url)
            .with_name(name)
            .with_object_class(object_class)
            .with_image_reference(image_reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DailyScpError;
    use crate::testing::{fixtures, StaticFetcher};
    use pretty_assertions::assert_eq;

    fn lookup(fetcher: StaticFetcher) -> EntryLookup {
        EntryLookup::new(Arc::new(fetcher), &CatalogConfig::default())
    }

    #[tokio::test]
    async fn test_lookup_complete_entry() {
        let fetcher = fixtures::sculpture_fetcher();
        let record = lookup(fetcher)
            .lookup(&Designation::parse("173").unwrap())
            .await
            .unwrap();

        assert_eq!(record.name(), Some("The Sculpture"));
        assert_eq!(record.object_class(), Some("Euclid"));
        assert_eq!(record.image_reference(), Some(fixtures::SCULPTURE_IMAGE_URL));
        assert_eq!(
            record.to_string(),
            "SCP-173 - The Sculpture\nObject Class: Euclid\nhttp://www.scp-wiki.net/scp-173"
        );
    }

    #[tokio::test]
    async fn test_unknown_series_fetches_nothing() {
        let fetcher = Arc::new(StaticFetcher::new());
        let lookup = EntryLookup::new(fetcher.clone(), &CatalogConfig::default());

        let err = lookup
            .lookup(&Designation::parse("4000").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DailyScpError::UnknownSeriesIndex { .. }));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_entry_page_is_fetch_error() {
        let fetcher = StaticFetcher::new().with_page(
            fixtures::SERIES_ONE_URL,
            fixtures::series_index(&[("/scp-173", "SCP-173 - The Sculpture")]),
        );
        let err = lookup(fetcher)
            .lookup(&Designation::parse("173").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DailyScpError::Fetch { .. }));
    }

    #[test]
    fn test_assemble_incomplete() {
        let record = lookup(StaticFetcher::new()).assemble(
            Designation::parse("12").unwrap(),
            "http://www.scp-wiki.net/scp-012".to_string(),
            &fixtures::series_index(&[("/scp-011", "SCP-011 - Sentient Civil War Memorial Statue")]),
            "<p>Nothing here.</p>",
        );
        assert_eq!(record.name(), None);
        assert_eq!(record.object_class(), None);
        assert_eq!(record.to_string(), "SCP-012\nhttp://www.scp-wiki.net/scp-012");
    }
}
