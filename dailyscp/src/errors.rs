//! Error types for dailyscp.
//!
//! Absence of a single field (name, object class, image) is not an error and
//! is carried as `Option` on [`EntryRecord`](crate::record::EntryRecord).
//! The variants here are the hard failures: an unknown series index, a
//! request for a complete record that is missing data, and I/O collaborators
//! failing underneath the core.

use thiserror::Error;

/// The main error type for dailyscp operations.
#[derive(Debug, Error)]
pub enum DailyScpError {
    /// The designation maps to no known series index page.
    #[error("Could not find series for SCP-{designation}.")]
    UnknownSeriesIndex {
        /// The offending designation.
        designation: String,
    },

    /// The input could not be turned into a designation.
    #[error("Invalid designation: {input:?}")]
    InvalidDesignation {
        /// The raw input.
        input: String,
    },

    /// A complete record was requested but no name was resolved.
    #[error("No name found for SCP-{designation}.")]
    NoNameAvailable {
        /// The designation of the incomplete record.
        designation: String,
    },

    /// A complete record was requested but no object class was resolved.
    #[error("No Object Class found for SCP-{designation}.")]
    NoObjectClassAvailable {
        /// The designation of the incomplete record.
        designation: String,
    },

    /// A page or image could not be fetched.
    #[error("Fetch failed for {url}: {message}")]
    Fetch {
        /// The requested URL.
        url: String,
        /// Transport or status description.
        message: String,
    },

    /// The social client refused or failed a post.
    #[error("Post failed: {0}")]
    Post(String),

    /// Configuration is missing or inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DailyScpError {
    /// Creates an unknown series index error.
    #[must_use]
    pub fn unknown_series(designation: impl Into<String>) -> Self {
        Self::UnknownSeriesIndex {
            designation: designation.into(),
        }
    }

    /// Creates a fetch error.
    #[must_use]
    pub fn fetch(url: impl Into<String>, message: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Whether the failure should be answered with the redacted placeholder
    /// reply rather than the record text.
    #[must_use]
    pub const fn is_redacted_on_reply(&self) -> bool {
        matches!(self, Self::UnknownSeriesIndex { .. } | Self::Fetch { .. })
    }

    /// Short machine-readable kind, logged alongside failures.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::UnknownSeriesIndex { .. } => "UnknownSeriesIndex",
            Self::InvalidDesignation { .. } => "InvalidDesignation",
            Self::NoNameAvailable { .. } => "NoNameAvailable",
            Self::NoObjectClassAvailable { .. } => "NoObjectClassAvailable",
            Self::Fetch { .. } => "Fetch",
            Self::Post(_) => "Post",
            Self::Config(_) => "Config",
            Self::Serialization(_) => "Serialization",
            Self::Io(_) => "Io",
        }
    }
}

impl From<serde_json::Error> for DailyScpError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T, E = DailyScpError> = std::result::Result<T, E>;
