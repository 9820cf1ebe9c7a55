//! The posting and reply loop.

use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::images::ImageStore;
use super::lookup::EntryLookup;
use super::protocols::{InboundMessage, Incident, IncidentReporter, PageFetcher, Poster};
use crate::config::DailyScpConfig;
use crate::errors::{DailyScpError, Result};
use crate::extract::MentionParser;
use crate::record::{Designation, EntryRecord};

/// Reported when a message names no entry the parser can tell apart.
pub const UNPARSED_MESSAGE: &str = "Unable to parse SCP from user message.";

/// The reply sent when an entry cannot be looked up at all.
#[must_use]
pub fn redacted_reply(reply_prefix: &str, raw_designation: &str) -> String {
    format!(
        "{reply_prefix}SCP-{} - [ACCESS DENIED]\nObject Class: [DATA EXPUNGED]\nhttp://scp-wiki.net/scp-\u{2588}\u{2588}\u{2588}\u{2588}",
        raw_designation.to_uppercase()
    )
}

/// How a message was answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyOutcome {
    /// Replied with the entry's record.
    Answered(EntryRecord),
    /// The entry could not be looked up; replied with the redacted
    /// placeholder.
    Redacted(String),
    /// No designation could be read from the message; nothing was sent.
    Unparsed,
}

/// Posts entries and answers messages.
pub struct DailyScpBot {
    lookup: EntryLookup,
    poster: Arc<dyn Poster>,
    reporter: Arc<dyn IncidentReporter>,
    mentions: MentionParser,
    images: ImageStore,
    entries: u32,
    max_post_attempts: usize,
}

impl std::fmt::Debug for DailyScpBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyScpBot")
            .field("lookup", &self.lookup)
            .field("images", &self.images)
            .field("entries", &self.entries)
            .field("max_post_attempts", &self.max_post_attempts)
            .finish_non_exhaustive()
    }
}

impl DailyScpBot {
    /// Creates a bot from a validated configuration and its collaborators.
    pub fn new(
        config: &DailyScpConfig,
        fetcher: Arc<dyn PageFetcher>,
        poster: Arc<dyn Poster>,
        reporter: Arc<dyn IncidentReporter>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            lookup: EntryLookup::new(fetcher, &config.catalog),
            poster,
            reporter,
            mentions: MentionParser::from_config(config)?,
            images: ImageStore::new(&config.posting.images_dir),
            entries: config.catalog.entries,
            max_post_attempts: config.posting.max_post_attempts,
        })
    }

    /// Posts the entry for `designation`.
    ///
    /// Only complete records are posted. The entry's image is attached when
    /// it can be downloaded and removed from disk afterwards. Failures are
    /// reported before being returned.
    pub async fn post_entry(&self, designation: &Designation) -> Result<EntryRecord> {
        match self.try_post(designation).await {
            Ok(record) => {
                info!(designation = %designation, "Posted entry");
                Ok(record)
            }
            Err(e) => {
                warn!(
                    designation = %designation,
                    error_kind = e.kind(),
                    error = %e,
                    "Failed to post entry"
                );
                self.reporter
                    .report(Incident::new(e.to_string()).with_designation(designation.as_str()))
                    .await;
                Err(e)
            }
        }
    }

    /// Posts a uniformly drawn entry.
    pub async fn post_random(&self) -> Result<EntryRecord> {
        let number = rand::thread_rng().gen_range(1..=self.entries);
        self.post_entry(&Designation::from_number(number)).await
    }

    /// Posts a random entry, drawing again after each failure up to the
    /// configured attempt limit. Exhaustion is reported and the last error
    /// returned.
    ///
    /// Images left behind by an earlier run are removed first.
    pub async fn scheduled_post(&self) -> Result<EntryRecord> {
        match self.images.clear().await {
            Ok(0) => {}
            Ok(removed) => debug!(removed, "Removed leftover entry images"),
            Err(e) => warn!(error_kind = e.kind(), error = %e, "Failed to clear entry images"),
        }

        let mut last_error = None;
        for attempt in 1..=self.max_post_attempts {
            match self.post_random().await {
                Ok(record) => return Ok(record),
                Err(e) => {
                    debug!(attempt, error_kind = e.kind(), error = %e, "Scheduled post attempt failed");
                    last_error = Some(e);
                }
            }
        }

        warn!(attempts = self.max_post_attempts, "Scheduled post gave up");
        self.reporter
            .report(Incident::new(format!(
                "Failed to post {} consecutive times.",
                self.max_post_attempts
            )))
            .await;
        Err(last_error.unwrap_or_else(|| {
            DailyScpError::Config("posting.max_post_attempts must be at least 1".into())
        }))
    }

    /// Answers a message addressed to the bot.
    ///
    /// The reply carries the record as found, even when name or object class
    /// are missing. Unknown series and fetch failures get the redacted
    /// placeholder instead.
    pub async fn reply_to(&self, message: &InboundMessage) -> Result<ReplyOutcome> {
        let Some(raw) = self.mentions.parse(&message.text) else {
            debug!(user = %message.user, "No designation in message");
            self.reporter
                .report(Incident::new(UNPARSED_MESSAGE).with_message(message.clone()))
                .await;
            return Ok(ReplyOutcome::Unparsed);
        };

        let looked_up = match Designation::parse(&raw) {
            Ok(designation) => self.lookup.lookup(&designation).await,
            Err(e) => Err(e),
        };

        match looked_up {
            Ok(record) => {
                let status = format!("{}{record}", message.reply_prefix());
                let image = self.download_image(&record).await;
                let replied = self
                    .poster
                    .reply(&status, &message.id, image.as_deref())
                    .await;
                if let Some(path) = &image {
                    self.images.remove(path).await;
                }
                if let Err(e) = replied {
                    self.report_reply_failure(&e, &raw, message).await;
                    return Err(e);
                }
                info!(user = %message.user, designation = %record.designation(), "Replied with entry");
                Ok(ReplyOutcome::Answered(record))
            }
            Err(e) if e.is_redacted_on_reply() => {
                self.report_reply_failure(&e, &raw, message).await;
                let status = redacted_reply(&message.reply_prefix(), &raw);
                self.poster.reply(&status, &message.id, None).await?;
                info!(user = %message.user, designation = %raw, "Replied with redacted entry");
                Ok(ReplyOutcome::Redacted(raw))
            }
            Err(e) => {
                self.report_reply_failure(&e, &raw, message).await;
                Err(e)
            }
        }
    }

    async fn try_post(&self, designation: &Designation) -> Result<EntryRecord> {
        let record = self.lookup.lookup(designation).await?;
        let status = record.complete_text()?;

        let image = self.download_image(&record).await;
        let posted = self.poster.post(&status, image.as_deref()).await;
        if let Some(path) = &image {
            self.images.remove(path).await;
        }
        posted?;
        Ok(record)
    }

    async fn download_image(&self, record: &EntryRecord) -> Option<PathBuf> {
        let reference = record.image_reference()?;
        match self
            .images
            .download(self.lookup.fetcher().as_ref(), record.designation(), reference)
            .await
        {
            Ok(path) => Some(path),
            Err(e) => {
                warn!(designation = %record.designation(), error = %e, "Posting without image");
                None
            }
        }
    }

    async fn report_reply_failure(&self, error: &DailyScpError, raw: &str, message: &InboundMessage) {
        warn!(
            user = %message.user,
            designation = raw,
            error_kind = error.kind(),
            error = %error,
            "Failed to answer message"
        );
        self.reporter
            .report(
                Incident::new(error.to_string())
                    .with_designation(raw)
                    .with_message(message.clone()),
            )
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redacted_reply() {
        assert_eq!(
            redacted_reply("@reader ", "4000-x"),
            "@reader SCP-4000-X - [ACCESS DENIED]\nObject Class: [DATA EXPUNGED]\nhttp://scp-wiki.net/scp-████"
        );
    }
}
