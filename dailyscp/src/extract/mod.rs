//! Extraction of entry metadata from index and entry pages, and of
//! designations from inbound messages.
//!
//! This module provides:
//! - Series index lookup for a designation
//! - Display-name resolution from an index listing
//! - Object class resolution with layered fallbacks
//! - Representative image lookup
//! - Mention parsing for user messages
//!
//! Every resolver takes an already-parsed document through
//! [`MarkupNode`](crate::markup::MarkupNode) and returns a fresh value.

mod image;
mod mention;
mod name;
mod object_class;
mod series;

pub use image::ImageLocator;
pub use mention::{Mention, MentionParser};
pub use name::{strip_listing_label, NameResolution, NameResolver};
pub use object_class::{
    capitalize, is_known_object_class, ClassResolver, OBJECT_CLASSES, OBJECT_CLASS_LABEL,
};
pub use series::SeriesIndexLocator;
