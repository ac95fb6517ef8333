//! `imgtag-engine`: image record model and tag classifier.
//!
//! Pure crate. Receives records, returns records. No filesystem access.

pub mod classify;
pub mod model;

pub use classify::{classify, transform, transform_all};
pub use model::{ReadOutcome, Record, RecordSet, SkippedRow, Tag};
