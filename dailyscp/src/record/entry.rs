//! The composed metadata of one entry.

use serde::Serialize;
use std::fmt;

use super::designation::{Designation, ENTRY_LABEL};
use crate::errors::{DailyScpError, Result};
use crate::extract::{capitalize, NameResolution};

/// Headings that are maintained by hand because the index listing cannot be
/// parsed into a name.
pub const NAME_OVERRIDES: &[(&str, &str)] = &[("2565", "Allison Eckhart")];

/// Resolved metadata for one designation. Built once per request; there are
/// no setters. Serialization is one-way so records only come from the
/// builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryRecord {
    designation: Designation,
    name: Option<String>,
    anomalous_name: bool,
    object_class: Option<String>,
    source_url: String,
    image_reference: Option<String>,
}

impl EntryRecord {
    /// Creates a record with only the designation and source URL filled in.
    #[must_use]
    pub fn new(designation: Designation, source_url: impl Into<String>) -> Self {
        Self {
            designation,
            name: None,
            anomalous_name: false,
            object_class: None,
            source_url: source_url.into(),
            image_reference: None,
        }
    }

    /// Sets the name from a resolution. The anomalous flag is dropped when
    /// there is no name.
    #[must_use]
    pub fn with_name(mut self, resolution: NameResolution) -> Self {
        self.anomalous_name = resolution.anomalous && resolution.name.is_some();
        self.name = resolution.name;
        self
    }

    /// Sets the object class, stored capitalized.
    #[must_use]
    pub fn with_object_class(mut self, object_class: Option<String>) -> Self {
        self.object_class = object_class
            .as_deref()
            .map(str::trim)
            .filter(|class| !class.is_empty())
            .map(capitalize);
        self
    }

    /// Sets the image reference.
    #[must_use]
    pub fn with_image_reference(mut self, image_reference: Option<String>) -> Self {
        self.image_reference = image_reference;
        self
    }

    /// The designation.
    #[must_use]
    pub const fn designation(&self) -> &Designation {
        &self.designation
    }

    /// The display name, if resolved.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether the name still carries a non-standard listing label.
    #[must_use]
    pub const fn anomalous_name(&self) -> bool {
        self.anomalous_name
    }

    /// The capitalized object class, if resolved.
    #[must_use]
    pub fn object_class(&self) -> Option<&str> {
        self.object_class.as_deref()
    }

    /// The entry's page URL.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// URL of a representative image, if the entry has one.
    #[must_use]
    pub fn image_reference(&self) -> Option<&str> {
        self.image_reference.as_deref()
    }

    /// First line of the text form: `SCP-<designation> - <name>`.
    #[must_use]
    pub fn heading(&self) -> String {
        if let Some((_, name)) = NAME_OVERRIDES
            .iter()
            .find(|(designation, _)| *designation == self.designation.as_str())
        {
            return format!("{} - {name}", self.designation.labelled());
        }

        match &self.name {
            Some(name) if self.anomalous_name => name.clone(),
            Some(name) => format!("{} - {name}", self.designation.labelled()),
            None => self.designation.labelled(),
        }
    }

    /// Returns the record only if both name and object class were resolved.
    pub fn require_complete(&self) -> Result<&Self> {
        if self.name.is_none() {
            return Err(DailyScpError::NoNameAvailable {
                designation: self.designation.to_string(),
            });
        }
        if self.object_class.is_none() {
            return Err(DailyScpError::NoObjectClassAvailable {
                designation: self.designation.to_string(),
            });
        }
        Ok(self)
    }

    /// The text form, only if the record is complete.
    pub fn complete_text(&self) -> Result<String> {
        self.require_complete().map(ToString::to_string)
    }
}

impl fmt::Display for EntryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading())?;
        if let Some(class) = &self.object_class {
            writeln!(f, "Object Class: {class}")?;
        }
        f.write_str(&self.source_url)
    }
}

/// Canonical page URL of an entry.
#[must_use]
pub fn source_url_for(wiki_base_url: &str, designation: &Designation) -> String {
    format!(
        "{}/scp-{}",
        wiki_base_url.trim_end_matches('/'),
        designation.as_str().to_lowercase()
    )
}

/// Reads a heading line (`SCP-173 - The Sculpture`) back into its
/// designation and name.
#[must_use]
pub fn parse_heading(line: &str) -> Option<(Designation, Option<String>)> {
    let line = line.trim();
    let prefix = format!("{ENTRY_LABEL}-");
    let head = line.get(..prefix.len())?;
    if !head.eq_ignore_ascii_case(&prefix) {
        return None;
    }
    let rest = &line[prefix.len()..];

    let (designation, name) = match rest.split_once(" - ") {
        Some((designation, name)) => (designation, Some(name.trim().to_string())),
        None => (rest, None),
    };
    Designation::parse(designation).ok().map(|d| (d, name))
}
