//! Fetching, posting and replying around the extraction core.
//!
//! This module provides:
//! - Protocol traits for pages, posts and incident reports
//! - An HTTP fetcher and a local image store
//! - [`EntryLookup`], which turns a designation into an entry record
//! - [`DailyScpBot`], the posting and reply loop

mod bot;
#[cfg(feature = "http")]
mod http;
mod images;
mod logging;
mod lookup;
mod protocols;


pub use bot::{redacted_reply, DailyScpBot, ReplyOutcome, UNPARSED_MESSAGE};
#[cfg(feature = "http")]
pub use http::HttpFetcher;
pub use images::ImageStore;
pub use logging::{DryRunPoster, LoggingIncidentReporter};
pub use lookup::EntryLookup;
pub use protocols::{InboundMessage, Incident, IncidentReporter, PageFetcher, Poster};
