//! In-memory collaborators for testing the bot.

use async_trait::async_trait;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::errors::{DailyScpError, Result};
use crate::service::{Incident, IncidentReporter, PageFetcher, Poster};

/// A fetcher that serves pages and images from memory and records every
/// requested URL. Unknown URLs fail like a 404.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, String>,
    bytes: HashMap<String, Vec<u8>>,
    requests: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// Creates a fetcher that serves nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `html` at `url`.
    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), html.into());
        self
    }

    /// Serves `bytes` at `url`.
    #[must_use]
    pub fn with_bytes(mut self, url: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.bytes.insert(url.into(), bytes);
        self
    }

    /// Returns every URL requested so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    fn record(&self, url: &str) {
        self.requests.lock().push(url.to_string());
    }
}

#[async_trait]
impl PageFetcher for StaticFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.record(url);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| DailyScpError::fetch(url, "HTTP 404 Not Found"))
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.record(url);
        self.bytes
            .get(url)
            .cloned()
            .ok_or_else(|| DailyScpError::fetch(url, "HTTP 404 Not Found"))
    }
}

/// A status captured by [`RecordingPoster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPost {
    /// The status text.
    pub status: String,
    /// The message replied to, for replies.
    pub in_reply_to: Option<String>,
    /// The attached image path.
    pub image: Option<PathBuf>,
    /// Contents of the attached image at the time of posting.
    pub image_bytes: Option<Vec<u8>>,
}

/// A poster that records statuses, optionally rejecting them all.
#[derive(Debug, Default)]
pub struct RecordingPoster {
    posts: RwLock<Vec<RecordedPost>>,
    failing: bool,
}

impl RecordingPoster {
    /// Creates a poster that accepts everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a poster that records and then rejects every status.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            posts: RwLock::default(),
            failing: true,
        }
    }

    /// Returns all recorded statuses.
    #[must_use]
    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.read().clone()
    }

    /// Returns true if nothing was posted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.read().is_empty()
    }

    async fn record(&self, status: &str, in_reply_to: Option<&str>, image: Option<&Path>) -> Result<()> {
        let image_bytes = match image {
            Some(path) => tokio::fs::read(path).await.ok(),
            None => None,
        };
        self.posts.write().push(RecordedPost {
            status: status.to_string(),
            in_reply_to: in_reply_to.map(str::to_string),
            image: image.map(Path::to_path_buf),
            image_bytes,
        });
        if self.failing {
            return Err(DailyScpError::Post("rejected".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Poster for RecordingPoster {
    async fn post(&self, status: &str, image: Option<&Path>) -> Result<()> {
        self.record(status, None, image).await
    }

    async fn reply(&self, status: &str, in_reply_to: &str, image: Option<&Path>) -> Result<()> {
        self.record(status, Some(in_reply_to), image).await
    }
}

/// An incident reporter that keeps every incident for inspection.
#[derive(Debug, Default)]
pub struct CollectingIncidentReporter {
    incidents: RwLock<Vec<Incident>>,
}

impl CollectingIncidentReporter {
    /// Creates a new collecting reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all collected incidents.
    #[must_use]
    pub fn incidents(&self) -> Vec<Incident> {
        self.incidents.read().clone()
    }

    /// Returns true if no incidents have been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.incidents.read().is_empty()
    }
}

#[async_trait]
impl IncidentReporter for CollectingIncidentReporter {
    async fn report(&self, incident: Incident) {
        self.incidents.write().push(incident);
    }
}
