//! Series index lookup.

use tracing::debug;

use crate::config::{CatalogConfig, SeriesBucket};
use crate::errors::{DailyScpError, Result};
use crate::record::Designation;

/// Substrings that mark a joke entry (`049-J`, `CU-...`).
const JOKE_MARKERS: &[&str] = &["j", "cu"];

/// Substring that marks an explained entry.
const EXPLAINED_MARKER: &str = "ex";

/// Maps designations to the index page that lists them.
#[derive(Debug, Clone)]
pub struct SeriesIndexLocator {
    buckets: Vec<SeriesBucket>,
    joke_index_url: String,
    explained_index_url: String,
}

impl SeriesIndexLocator {
    /// Creates a locator from the catalog configuration. Buckets are sorted
    /// by range start.
    #[must_use]
    pub fn new(catalog: &CatalogConfig) -> Self {
        let mut buckets = catalog.series_buckets.clone();
        buckets.sort_by_key(|b| b.start);
        Self {
            buckets,
            joke_index_url: catalog.joke_index_url.clone(),
            explained_index_url: catalog.explained_index_url.clone(),
        }
    }

    /// Returns the index page URL for `designation`.
    ///
    /// Numeric designations outside every configured bucket fail rather
    /// than falling back to a guess.
    pub fn locate(&self, designation: &Designation) -> Result<&str> {
        let url = match designation.number() {
            Some(number) => self
                .buckets
                .iter()
                .find(|bucket| bucket.contains(number))
                .map(|bucket| bucket.url.as_str()),
            None => self.locate_special(designation.as_str()),
        };

        match url {
            Some(url) => {
                debug!(designation = %designation, url, "Located series index");
                Ok(url)
            }
            None => Err(DailyScpError::unknown_series(designation.as_str())),
        }
    }

    fn locate_special(&self, designation: &str) -> Option<&str> {
        let lower = designation.to_lowercase();
        if JOKE_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return Some(self.joke_index_url.as_str());
        }
        if lower.contains(EXPLAINED_MARKER) {
            return Some(self.explained_index_url.as_str());
        }
        None
    }
}
