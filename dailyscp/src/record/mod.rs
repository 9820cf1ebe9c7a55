//! Entry designations and resolved entry records.

mod designation;
mod entry;

pub use designation::{Designation, ENTRY_LABEL, MIN_NUMERIC_WIDTH};
pub use entry::{parse_heading, source_url_for, EntryRecord, NAME_OVERRIDES};
