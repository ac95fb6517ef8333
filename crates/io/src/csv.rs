// Image record CSV import/export

use std::io::{self, Read, Write};
use std::path::Path;

use imgtag_engine::model::{ReadOutcome, Record, SkippedRow, OUTPUT_HEADER};

use crate::error::PipelineError;

/// Read `path` and split it into well-formed records and skipped rows.
///
/// The file must be UTF-8. A missing file is `InputNotFound`; every other
/// failure is `InputRead`. Rows without exactly three fields are skipped.
pub fn read_records(path: &Path) -> Result<ReadOutcome, PipelineError> {
    let content = read_file_as_utf8(path)?;
    parse_records(&content).map_err(|message| PipelineError::InputRead {
        path: path.to_path_buf(),
        message,
    })
}

/// Read a file strictly as UTF-8.
pub fn read_file_as_utf8(path: &Path) -> Result<String, PipelineError> {
    let read_err = |message: String| PipelineError::InputRead {
        path: path.to_path_buf(),
        message,
    };

    let mut file = std::fs::File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PipelineError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => read_err(e.to_string()),
    })?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| read_err(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| read_err(format!("invalid UTF-8: {e}")))
}

/// Parse comma-delimited, quote-aware text into records.
///
/// Blank lines between rows count as skipped rows with no fields. A final
/// line terminator does not start another row.
pub fn parse_records(content: &str) -> Result<ReadOutcome, String> {
    let mut outcome = ReadOutcome::default();

    for (line, text) in split_rows(content) {
        if text.is_empty() {
            skip_row(&mut outcome, line, Vec::new());
            continue;
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        for result in reader.records() {
            let row = result.map_err(|e| format!("line {line}: {e}"))?;
            let fields: Vec<&str> = row.iter().collect();

            match Record::from_fields(&fields) {
                Some(record) => outcome.records.push(record),
                None => {
                    let offset = row.position().map(|p| p.line().saturating_sub(1));
                    let fields = fields.into_iter().map(str::to_string).collect();
                    skip_row(&mut outcome, line + offset.unwrap_or(0), fields);
                }
            }
        }
    }

    log::debug!(
        "parsed {} record(s), skipped {}",
        outcome.valid_count(),
        outcome.skipped_count()
    );
    Ok(outcome)
}

fn skip_row(outcome: &mut ReadOutcome, line: u64, fields: Vec<String>) {
    log::warn!("line {line}: expected 3 fields, found {}", fields.len());
    outcome.skipped.push(SkippedRow { line, fields });
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Scan {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

/// Split `content` into physical rows, each tagged with its 1-based start line.
///
/// A `\n` ends a row unless it sits inside a quoted field. A `\r` before the
/// terminator is dropped. The `csv` reader ignores empty lines, so rows are
/// cut here first to keep blank lines visible.
fn split_rows(content: &str) -> Vec<(u64, &str)> {
    let mut rows = Vec::new();
    let mut state = Scan::FieldStart;
    let mut start = 0;
    let mut start_line = 1u64;
    let mut line = 1u64;

    for (i, b) in content.bytes().enumerate() {
        state = match (state, b) {
            (Scan::Quoted, b'"') => Scan::QuoteInQuoted,
            (Scan::Quoted, _) => Scan::Quoted,
            (Scan::QuoteInQuoted, b'"') => Scan::Quoted,
            (Scan::FieldStart, b'"') => Scan::Quoted,
            (_, b'\n') => {
                let text = &content[start..i];
                rows.push((start_line, text.strip_suffix('\r').unwrap_or(text)));
                start = i + 1;
                start_line = line + 1;
                Scan::FieldStart
            }
            (_, b',') => Scan::FieldStart,
            _ => Scan::Unquoted,
        };
        if b == b'\n' {
            line += 1;
        }
    }

    if start < content.len() {
        rows.push((start_line, &content[start..]));
    }
    rows
}

/// Serialize the header and `records` with every field quoted.
pub fn write_records<W: Write>(records: &[Record], out: W) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::CRLF)
        .from_writer(out);

    writer
        .write_record(OUTPUT_HEADER)
        .map_err(|e| e.to_string())?;
    for record in records {
        writer
            .write_record(record.as_fields())
            .map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}
