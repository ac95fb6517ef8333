use std::fmt;

/// Number of fields in a well-formed input row.
pub const RECORD_FIELDS: usize = 3;

/// Header written before the records in the output file.
pub const OUTPUT_HEADER: [&str; RECORD_FIELDS] = ["folder", "name", "tags"];

/// One (folder, filename, tag) triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub folder: String,
    pub filename: String,
    pub tag: String,
}

impl Record {
    pub fn new(
        folder: impl Into<String>,
        filename: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            folder: folder.into(),
            filename: filename.into(),
            tag: tag.into(),
        }
    }

    /// Build a record from raw parsed fields.
    ///
    /// Returns `None` unless there are exactly three fields.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Option<Self> {
        match fields {
            [folder, filename, tag] => Some(Self::new(
                folder.as_ref(),
                filename.as_ref(),
                tag.as_ref(),
            )),
            _ => None,
        }
    }

    pub fn as_fields(&self) -> [&str; RECORD_FIELDS] {
        [&self.folder, &self.filename, &self.tag]
    }
}

/// Records in input order. No uniqueness constraint.
pub type RecordSet = Vec<Record>;

/// A parsed row that did not have exactly three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based line where the row starts.
    pub line: u64,
    pub fields: Vec<String>,
}

/// Renders as a bracketed list of single-quoted fields, e.g. `['folder3', 'onlyname']`.
impl fmt::Display for SkippedRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_quoted(f, field)?;
        }
        f.write_str("]")
    }
}

// Single quotes unless the field contains a single quote and no double quote.
fn write_quoted(f: &mut fmt::Formatter<'_>, field: &str) -> fmt::Result {
    let quote = if field.contains('\'') && !field.contains('"') {
        '"'
    } else {
        '\''
    };
    write!(f, "{quote}")?;
    for ch in field.chars() {
        match ch {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if c == quote => write!(f, "\\{c}")?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "{quote}")
}

/// Everything the reader produced: accepted records plus the rows it dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOutcome {
    pub records: RecordSet,
    pub skipped: Vec<SkippedRow>,
}

impl ReadOutcome {
    pub fn valid_count(&self) -> usize {
        self.records.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Classification of a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Filename ends in a digit.
    ForSale,
    Sold,
}

impl Tag {
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::ForSale => "forsale",
            Self::Sold => "sold",
        }
    }

    /// Render the tag string stored in the third field, e.g. `"prints forsale"`.
    pub fn label(&self, folder: &str) -> String {
        format!("{folder} {}", self.suffix())
    }
}
