use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Record, RecordSet, Tag};

// One optional trailing newline is allowed after the digits.
static ENDS_WITH_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\n?\z").expect("static regex is valid"));

/// Classify a filename: trailing digits mean the image is still for sale.
pub fn classify(filename: &str) -> Tag {
    if ENDS_WITH_DIGIT.is_match(filename) {
        Tag::ForSale
    } else {
        Tag::Sold
    }
}

/// Recompute the tag of a record. The incoming tag is discarded.
pub fn transform(record: Record) -> Record {
    let tag = classify(&record.filename).label(&record.folder);
    Record { tag, ..record }
}

/// Transform every record, preserving order.
pub fn transform_all(records: RecordSet) -> RecordSet {
    records.into_iter().map(transform).collect()
}
