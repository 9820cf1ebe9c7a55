//! Entry designations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::{DailyScpError, Result};

/// Label that precedes every designation (`SCP-049`).
pub const ENTRY_LABEL: &str = "SCP";

/// Minimum width numeric designations are zero-padded to.
pub const MIN_NUMERIC_WIDTH: usize = 3;

/// Normalized identifier of one catalog entry: upper case, and zero-padded to
/// three digits when purely numeric (`7` → `007`). Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Designation(String);

impl Designation {
    /// Normalizes raw input into a designation.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(DailyScpError::InvalidDesignation {
                input: input.to_string(),
            });
        }

        let upper = trimmed.to_uppercase();
        if upper.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Self(format!("{upper:0>width$}", width = MIN_NUMERIC_WIDTH)));
        }
        Ok(Self(upper))
    }

    /// Builds the designation for a catalog number.
    #[must_use]
    pub fn from_number(number: u32) -> Self {
        Self(format!("{number:0>width$}", width = MIN_NUMERIC_WIDTH))
    }

    /// The normalized string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric value when the designation is purely numeric.
    #[must_use]
    pub fn number(&self) -> Option<u32> {
        self.0.parse().ok()
    }

    /// `SCP-<designation>`.
    #[must_use]
    pub fn labelled(&self) -> String {
        format!("{ENTRY_LABEL}-{}", self.0)
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Designation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Designation {
    type Error = DailyScpError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Designation> for String {
    fn from(value: Designation) -> Self {
        value.0
    }
}

impl std::str::FromStr for Designation {
    type Err = DailyScpError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_padding() {
        assert_eq!(Designation::parse("7").unwrap().as_str(), "007");
        assert_eq!(Designation::parse("49").unwrap().as_str(), "049");
        assert_eq!(Designation::parse("173").unwrap().as_str(), "173");
        assert_eq!(Designation::parse("2565").unwrap().as_str(), "2565");
        assert_eq!(Designation::from_number(7).as_str(), "007");
    }

    #[test]
    fn test_non_numeric_uppercased_not_padded() {
        assert_eq!(Designation::parse(" 049-j ").unwrap().as_str(), "049-J");
        assert_eq!(Designation::parse("ex").unwrap().as_str(), "EX");
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(
            Designation::parse("   "),
            Err(DailyScpError::InvalidDesignation { .. })
        ));
    }

    #[test]
    fn test_number() {
        assert_eq!(Designation::parse("007").unwrap().number(), Some(7));
        assert_eq!(Designation::parse("001-EX").unwrap().number(), None);
    }

    #[test]
    fn test_labelled() {
        assert_eq!(Designation::parse("49").unwrap().labelled(), "SCP-049");
    }

    #[test]
    fn test_serde_normalizes() {
        let d: Designation = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(d.as_str(), "012");
        assert!(serde_json::from_str::<Designation>("\"\"").is_err());
    }
}
