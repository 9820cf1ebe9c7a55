//! Configuration types for extraction, fetching and posting.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{DailyScpError, Result};

/// A contiguous range of numeric designations listed on one index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesBucket {
    /// First designation in the range (inclusive).
    pub start: u32,
    /// Last designation in the range (inclusive).
    pub end: u32,
    /// Index page URL.
    pub url: String,
}

impl SeriesBucket {
    /// Creates a new bucket.
    #[must_use]
    pub fn new(start: u32, end: u32, url: impl Into<String>) -> Self {
        Self {
            start,
            end,
            url: url.into(),
        }
    }

    /// Whether `number` falls inside this bucket.
    #[must_use]
    pub const fn contains(&self, number: u32) -> bool {
        self.start <= number && number <= self.end
    }
}

/// Configuration describing the wiki catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Known catalog size; random designations are drawn from `1..=entries`.
    #[serde(default = "default_entries")]
    pub entries: u32,
    /// Number of leading `label - ` segments stripped from index listings.
    #[serde(default = "default_dashes")]
    pub dashes_in_listing: usize,
    /// Base URL of the wiki, without a trailing slash.
    #[serde(default = "default_wiki_base_url")]
    pub wiki_base_url: String,
    /// Numeric index pages, sorted by range.
    #[serde(default = "default_series_buckets")]
    pub series_buckets: Vec<SeriesBucket>,
    /// Index page for joke entries.
    #[serde(default = "default_joke_index_url")]
    pub joke_index_url: String,
    /// Index page for explained entries.
    #[serde(default = "default_explained_index_url")]
    pub explained_index_url: String,
}

const fn default_entries() -> u32 {
    5999
}

const fn default_dashes() -> usize {
    2
}

fn default_wiki_base_url() -> String {
    "http://www.scp-wiki.net".to_string()
}

fn default_series_buckets() -> Vec<SeriesBucket> {
    vec![
        SeriesBucket::new(1, 999, "http://www.scp-wiki.net/scp-series"),
        SeriesBucket::new(1000, 1999, "http://www.scp-wiki.net/scp-series-2"),
        SeriesBucket::new(2000, 2999, "http://www.scp-wiki.net/scp-series-3"),
    ]
}

fn default_joke_index_url() -> String {
    "http://www.scp-wiki.net/joke-scps".to_string()
}

fn default_explained_index_url() -> String {
    "http://www.scp-wiki.net/scp-ex".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            entries: default_entries(),
            dashes_in_listing: default_dashes(),
            wiki_base_url: default_wiki_base_url(),
            series_buckets: default_series_buckets(),
            joke_index_url: default_joke_index_url(),
            explained_index_url: default_explained_index_url(),
        }
    }
}

impl CatalogConfig {
    /// Creates a new catalog configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the catalog size.
    #[must_use]
    pub fn with_entries(mut self, entries: u32) -> Self {
        self.entries = entries;
        self
    }

    /// Appends a numeric series bucket.
    #[must_use]
    pub fn with_bucket(mut self, start: u32, end: u32, url: impl Into<String>) -> Self {
        self.series_buckets.push(SeriesBucket::new(start, end, url));
        self
    }

    /// Sets the wiki base URL.
    #[must_use]
    pub fn with_wiki_base_url(mut self, url: impl Into<String>) -> Self {
        self.wiki_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.entries == 0 {
            return Err(DailyScpError::Config("catalog.entries must be at least 1".into()));
        }
        if self.series_buckets.is_empty() {
            return Err(DailyScpError::Config("catalog.series_buckets is empty".into()));
        }
        for bucket in &self.series_buckets {
            if bucket.start > bucket.end {
                return Err(DailyScpError::Config(format!(
                    "series bucket {}..={} is inverted",
                    bucket.start, bucket.end
                )));
            }
        }
        for pair in self.series_buckets.windows(2) {
            if pair[0].end >= pair[1].start {
                return Err(DailyScpError::Config(format!(
                    "series buckets {}..={} and {}..={} overlap or are unsorted",
                    pair[0].start, pair[0].end, pair[1].start, pair[1].end
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for mention parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentionConfig {
    /// Handle of the bot, removed from inbound text before matching.
    #[serde(default = "default_bot_handle")]
    pub bot_handle: String,
}

fn default_bot_handle() -> String {
    "@dailyscp".to_string()
}

impl Default for MentionConfig {
    fn default() -> Self {
        Self {
            bot_handle: default_bot_handle(),
        }
    }
}

/// Configuration for HTTP fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

const fn default_timeout() -> f64 {
    30.0
}

fn default_user_agent() -> String {
    concat!("dailyscp/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// Sets the timeout.
    #[must_use]
    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Gets timeout as Duration. Fails unless the timeout is a positive,
    /// finite number of seconds that fits a `Duration`.
    pub fn timeout(&self) -> Result<Duration> {
        if !(self.timeout_seconds.is_finite() && self.timeout_seconds > 0.0) {
            return Err(DailyScpError::Config(format!(
                "fetch.timeout_seconds must be positive, got {}",
                self.timeout_seconds
            )));
        }
        Duration::try_from_secs_f64(self.timeout_seconds)
            .map_err(|e| DailyScpError::Config(format!("fetch.timeout_seconds: {e}")))
    }
}

/// Configuration for the posting loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingConfig {
    /// Attempts made by a scheduled post before giving up.
    #[serde(default = "default_max_post_attempts")]
    pub max_post_attempts: usize,
    /// Directory that downloaded entry images are written to.
    #[serde(default = "default_images_dir")]
    pub images_dir: PathBuf,
}

const fn default_max_post_attempts() -> usize {
    100
}

fn default_images_dir() -> PathBuf {
    PathBuf::from("images")
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            max_post_attempts: default_max_post_attempts(),
            images_dir: default_images_dir(),
        }
    }
}

/// Combined configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyScpConfig {
    /// Catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,
    /// Mention parsing configuration.
    #[serde(default)]
    pub mention: MentionConfig,
    /// Fetch configuration.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Posting configuration.
    #[serde(default)]
    pub posting: PostingConfig,
}

impl DailyScpConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Sets the catalog configuration.
    #[must_use]
    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }

    /// Sets the bot handle.
    #[must_use]
    pub fn with_bot_handle(mut self, handle: impl Into<String>) -> Self {
        self.mention.bot_handle = handle.into();
        self
    }

    /// Sets the image directory.
    #[must_use]
    pub fn with_images_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.posting.images_dir = dir.into();
        self
    }

    /// Checks cross-field consistency.
    pub fn validate(&self) -> Result<()> {
        self.catalog.validate()?;
        self.fetch.timeout()?;
        if self.mention.bot_handle.trim().is_empty() {
            return Err(DailyScpError::Config("mention.bot_handle is empty".into()));
        }
        if self.posting.max_post_attempts == 0 {
            return Err(DailyScpError::Config(
                "posting.max_post_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_defaults() {
        let config = CatalogConfig::default();
        assert_eq!(config.entries, 5999);
        assert_eq!(config.dashes_in_listing, 2);
        assert_eq!(config.series_buckets.len(), 3);
        assert!(config.series_buckets[1].contains(1000));
        assert!(!config.series_buckets[1].contains(2000));
    }

    #[test]
    fn test_defaults_validate() {
        assert!(DailyScpConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DailyScpConfig::from_json_str(
            r#"{"catalog": {"entries": 7999}, "mention": {"bot_handle": "@otherbot"}}"#,
        )
        .unwrap();

        assert_eq!(config.catalog.entries, 7999);
        assert_eq!(config.catalog.dashes_in_listing, 2);
        assert_eq!(config.mention.bot_handle, "@otherbot");
        assert_eq!(config.posting.max_post_attempts, 100);
    }

    #[test]
    fn test_overlapping_buckets_rejected() {
        let catalog = CatalogConfig::new().with_bucket(2500, 3999, "http://example.com/x");
        let config = DailyScpConfig::new().with_catalog(catalog);
        assert!(matches!(config.validate(), Err(DailyScpError::Config(_))));
    }

    #[test]
    fn test_extended_bucket_accepted() {
        let catalog =
            CatalogConfig::new().with_bucket(3000, 3999, "http://www.scp-wiki.net/scp-series-4");
        let config = DailyScpConfig::new().with_catalog(catalog);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_entries_rejected() {
        let config = DailyScpConfig::new().with_catalog(CatalogConfig::new().with_entries(0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_handle_rejected() {
        let config = DailyScpConfig::new().with_bot_handle("  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = DailyScpConfig::new().with_images_dir("/tmp/scp");
        let json = serde_json::to_string(&config).unwrap();
        let parsed = DailyScpConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed.posting.images_dir, PathBuf::from("/tmp/scp"));
        assert_eq!(parsed.catalog.series_buckets, config.catalog.series_buckets);
    }

    #[test]
    fn test_bad_timeouts_rejected() {
        for json in [
            r#"{"fetch": {"timeout_seconds": -1}}"#,
            r#"{"fetch": {"timeout_seconds": 0}}"#,
            r#"{"fetch": {"timeout_seconds": 1e300}}"#,
        ] {
            assert!(
                matches!(DailyScpConfig::from_json_str(json), Err(DailyScpError::Config(_))),
                "accepted {json}"
            );
        }
        let config = DailyScpConfig {
            fetch: FetchConfig::default().with_timeout(f64::NAN),
            ..DailyScpConfig::default()
        };
        assert!(config.validate().is_err());
        assert!(config.fetch.timeout().is_err());
    }

    #[test]
    fn test_inverted_bucket_rejected() {
        let mut catalog = CatalogConfig::new();
        catalog.series_buckets = vec![SeriesBucket::new(999, 1, "http://www.scp-wiki.net/scp-series")];
        let err = DailyScpConfig::new().with_catalog(catalog).validate().unwrap_err();
        assert!(err.to_string().contains("inverted"));
    }

    #[test]
    fn test_empty_bucket_table_rejected() {
        let mut catalog = CatalogConfig::new();
        catalog.series_buckets.clear();
        let err = DailyScpConfig::new().with_catalog(catalog).validate().unwrap_err();
        assert!(matches!(err, DailyScpError::Config(_)));
        assert!(err.to_string().contains("series_buckets"));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let result = DailyScpConfig::from_json_str(r#"{"catalog": {"entries": "many"}}"#);
        assert!(matches!(result, Err(DailyScpError::Serialization(_))));
        let result = DailyScpConfig::from_json_str("{not json");
        assert!(matches!(result, Err(DailyScpError::Serialization(_))));
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dailyscp.json");
        std::fs::write(&path, r#"{"posting": {"max_post_attempts": 7}}"#).unwrap();

        let config = DailyScpConfig::from_json_file(&path).unwrap();
        assert_eq!(config.posting.max_post_attempts, 7);

        let missing = DailyScpConfig::from_json_file(dir.path().join("absent.json"));
        assert!(matches!(missing, Err(DailyScpError::Io(_))));
    }

    #[test]
    fn test_fetch_timeout() {
        let config = FetchConfig::default().with_timeout(2.5);
        assert_eq!(config.timeout().unwrap(), Duration::from_millis(2500));
        assert!(config.user_agent.starts_with("dailyscp/"));
    }
}
