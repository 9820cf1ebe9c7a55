//! # dailyscp
//!
//! Metadata extraction and mention parsing for a bot that posts one SCP
//! Foundation wiki entry a day and answers requests for specific entries.
//!
//! The crate is split into:
//!
//! - **Extraction core** (`extract`, `markup`, `record`): pure, synchronous
//!   resolvers that read names, object classes and images out of parsed
//!   pages, and designations out of user messages
//! - **Orchestration** (`service`): async fetching, posting and replying
//!   through pluggable collaborators
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dailyscp::prelude::*;
//!
//! let config = DailyScpConfig::default();
//! let fetcher = Arc::new(HttpFetcher::new(&config.fetch)?);
//! let lookup = EntryLookup::new(fetcher, &config.catalog);
//!
//! let record = lookup.lookup(&Designation::parse("173")?).await?;
//! println!("{record}");
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod errors;
pub mod extract;
pub mod markup;
pub mod record;
pub mod service;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{
        CatalogConfig, DailyScpConfig, FetchConfig, MentionConfig, PostingConfig, SeriesBucket,
    };
    pub use crate::errors::{DailyScpError, Result};
    pub use crate::extract::{
        ClassResolver, ImageLocator, Mention, MentionParser, NameResolution, NameResolver,
        SeriesIndexLocator,
    };
    pub use crate::markup::{HtmlDocument, MarkupNode, Query};
    pub use crate::record::{Designation, EntryRecord};
    #[cfg(feature = "http")]
    pub use crate::service::HttpFetcher;
    pub use crate::service::{
        DailyScpBot, DryRunPoster, EntryLookup, ImageStore, InboundMessage, Incident,
        IncidentReporter, LoggingIncidentReporter, PageFetcher, Poster, ReplyOutcome,
    };
    pub use std::sync::Arc;
}
