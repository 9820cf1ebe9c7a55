//! Test assertions for records and incidents.

use super::mocks::CollectingIncidentReporter;
use crate::record::EntryRecord;

/// Asserts that the record has both a name and an object class.
pub fn assert_record_complete(record: &EntryRecord) {
    assert!(
        record.require_complete().is_ok(),
        "Expected complete record, got name {:?} and object class {:?}",
        record.name(),
        record.object_class()
    );
}

/// Asserts the record's name and object class.
pub fn assert_record_fields(record: &EntryRecord, name: Option<&str>, object_class: Option<&str>) {
    assert_eq!(
        (record.name(), record.object_class()),
        (name, object_class),
        "Unexpected fields for SCP-{}",
        record.designation()
    );
}

/// Asserts that some reported incident's error text contains `needle`.
pub fn assert_incident_reported(reporter: &CollectingIncidentReporter, needle: &str) {
    let incidents = reporter.incidents();
    assert!(
        incidents.iter().any(|incident| incident.error.contains(needle)),
        "Expected an incident containing '{}', got {:?}",
        needle,
        incidents.iter().map(|i| &i.error).collect::<Vec<_>>()
    );
}
