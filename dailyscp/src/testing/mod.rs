//! Testing utilities for the bot.
//!
//! This module provides:
//! - In-memory fetcher, poster and incident reporter
//! - Assertions for records and incidents
//! - HTML fixtures shaped like wiki pages

mod assertions;
pub mod fixtures;
mod mocks;

pub use assertions::{assert_incident_reported, assert_record_complete, assert_record_fields};
pub use mocks::{CollectingIncidentReporter, RecordedPost, RecordingPoster, StaticFetcher};
