//! Object class extraction from entry pages.
//!
//! Three strategies are tried in order:
//!
//! 1. The authored `<strong>Object Class:</strong> Value` label. Values
//!    outside [`OBJECT_CLASSES`] are treated as corrupted and dropped.
//! 2. The page's tag list, scanned in vocabulary order.
//! 3. Any text in the body containing the label, taken as-is without the
//!    vocabulary check.

use tracing::debug;

use crate::markup::{MarkupNode, Query};

/// Recognized object classes, in lookup priority order.
pub const OBJECT_CLASSES: &[&str] = &[
    "explained",
    "neutralized",
    "safe",
    "euclid",
    "keter",
    "thaumiel",
    "unclassed",
    "none",
    "unknown",
];

/// Label preceding the object class in an entry.
pub const OBJECT_CLASS_LABEL: &str = "Object Class:";

/// Whether `value` is a recognized object class, ignoring case.
#[must_use]
pub fn is_known_object_class(value: &str) -> bool {
    let lower = value.to_lowercase();
    OBJECT_CLASSES.contains(&lower.as_str())
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

/// Resolves the object class of an entry page.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassResolver;

impl ClassResolver {
    /// Creates a resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Returns the capitalized object class, or `None` when every strategy
    /// comes up empty.
    pub fn resolve<N: MarkupNode>(&self, entry: &N) -> Option<String> {
        if let Some(class) = from_label(entry) {
            debug!(object_class = %class, strategy = "label", "Resolved object class");
            return Some(class);
        }
        if let Some(class) = from_tags(entry) {
            debug!(object_class = %class, strategy = "tags", "Resolved object class");
            return Some(class);
        }
        let class = from_body_text(entry);
        match &class {
            Some(class) => {
                debug!(object_class = %class, strategy = "body", "Resolved object class");
            }
            None => debug!("No object class found"),
        }
        class
    }
}

fn from_label<N: MarkupNode>(entry: &N) -> Option<String> {
    let label = entry.find_first(&Query::tag("strong").with_text(OBJECT_CLASS_LABEL))?;
    let container = label.parent()?;
    let value = value_after_label(&container)?;
    if is_known_object_class(&value) {
        Some(capitalize(&value))
    } else {
        debug!(value = %value, "Discarding unrecognized object class label");
        None
    }
}

fn from_tags<N: MarkupNode>(entry: &N) -> Option<String> {
    let tags = entry.find_first(&Query::tag("div").with_class("page-tags"))?;
    OBJECT_CLASSES
        .iter()
        .find(|class| tags.find_first(&Query::any().with_text(**class)).is_some())
        .map(|class| capitalize(class))
}

fn from_body_text<N: MarkupNode>(entry: &N) -> Option<String> {
    let body = entry.find_first(&Query::tag("body"))?;
    let holder = body.find_first(&Query::any().with_own_text_containing(OBJECT_CLASS_LABEL))?;
    // a bare label element carries no value itself; its container does
    value_after_label(&holder)
        .or_else(|| holder.parent().and_then(|parent| value_after_label(&parent)))
        .map(|value| capitalize(&value))
}

/// Reads `container` without footnote markers and struck-out text, and
/// returns what follows the first colon.
fn value_after_label<N: MarkupNode>(container: &N) -> Option<String> {
    let text = container
        .without(&Query::footnote_ref())
        .without(&Query::strikethrough())
        .text();
    let (_, value) = text.split_once(':')?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
