//! Protocol traits for the bot's collaborators.
//!
//! These traits define the interfaces for fetching pages, publishing
//! statuses and reporting incidents, allowing for pluggable implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::Result;

/// Fetches pages and images.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns the body as text.
    ///
    /// Non-success statuses are errors.
    async fn fetch_text(&self, url: &str) -> Result<String>;

    /// Fetches `url` and returns the raw body.
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

/// Publishes statuses.
#[async_trait]
pub trait Poster: Send + Sync {
    /// Publishes a top-level status, optionally with an attached image file.
    async fn post(&self, status: &str, image: Option<&Path>) -> Result<()>;

    /// Publishes a reply to the message with id `in_reply_to`.
    async fn reply(&self, status: &str, in_reply_to: &str, image: Option<&Path>) -> Result<()>;
}

/// Receives failures that someone should look at.
#[async_trait]
pub trait IncidentReporter: Send + Sync {
    /// Reports an incident. Reporting itself never fails.
    async fn report(&self, incident: Incident);
}

/// A message addressed to the bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Identifier to reply to.
    pub id: String,
    /// Handle of the author, without the leading `@`.
    pub user: String,
    /// Message text, including the bot's handle.
    pub text: String,
}

impl InboundMessage {
    /// Creates a new inbound message.
    #[must_use]
    pub fn new(id: impl Into<String>, user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user: user.into(),
            text: text.into(),
        }
    }

    /// Prefix that addresses a reply to the author.
    #[must_use]
    pub fn reply_prefix(&self) -> String {
        format!("@{} ", self.user)
    }
}

/// A failure worth a human's attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Incident {
    /// The error text.
    pub error: String,
    /// Designation being handled when the failure happened.
    pub designation: Option<String>,
    /// The message being answered, if any.
    pub message: Option<InboundMessage>,
}

impl Incident {
    /// Creates an incident with only an error text.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            designation: None,
            message: None,
        }
    }

    /// Sets the designation.
    #[must_use]
    pub fn with_designation(mut self, designation: impl Into<String>) -> Self {
        self.designation = Some(designation.into());
        self
    }

    /// Sets the inbound message.
    #[must_use]
    pub fn with_message(mut self, message: InboundMessage) -> Self {
        self.message = Some(message);
        self
    }
}

impl fmt::Display for Incident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(designation) = &self.designation {
            writeln!(f, "Anomalous entry: SCP-{designation}")?;
        }
        write!(f, "Error: {}", self.error)?;
        if let Some(message) = &self.message {
            write!(f, "\nUser: {}\nTweet:\n{}", message.user, message.text)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_incident_rendering() {
        let incident = Incident::new("Could not find series for SCP-9999.")
            .with_designation("9999")
            .with_message(InboundMessage::new("1", "reader", "@dailyscp SCP-9999"));
        assert_eq!(
            incident.to_string(),
            "Anomalous entry: SCP-9999\nError: Could not find series for SCP-9999.\nUser: reader\nTweet:\n@dailyscp SCP-9999"
        );
    }

    #[test]
    fn test_bare_incident() {
        assert_eq!(Incident::new("boom").to_string(), "Error: boom");
        assert_eq!(
            Incident::new("boom").with_designation("049-J").to_string(),
            "Anomalous entry: SCP-049-J\nError: boom"
        );
    }

    #[test]
    fn test_reply_prefix() {
        assert_eq!(InboundMessage::new("1", "reader", "").reply_prefix(), "@reader ");
    }
}
