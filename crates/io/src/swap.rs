//! Write-to-temp then replace.
//!
//! The output is first written to a temp file. Only after that succeeds are
//! the original input and any stale output removed and the temp renamed into
//! place. A failure part-way through the swap is not rolled back; the temp
//! file is left on disk as the recovery copy.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use imgtag_engine::model::Record;

use crate::csv::write_records;
use crate::error::PipelineError;

/// Write `records` to `temp`. On failure the partial temp file is removed.
pub fn write_temp(records: &[Record], temp: &Path) -> Result<(), PipelineError> {
    let result = File::create(temp)
        .map_err(|e| e.to_string())
        .and_then(|file| write_records(records, BufWriter::new(file)));

    if let Err(message) = result {
        if temp.exists() {
            if let Err(e) = std::fs::remove_file(temp) {
                log::warn!("could not remove partial temp file {}: {e}", temp.display());
            }
        }
        return Err(PipelineError::OutputWrite {
            path: temp.to_path_buf(),
            message,
        });
    }

    log::debug!("wrote {} record(s) to {}", records.len(), temp.display());
    Ok(())
}

/// Delete `input`, delete `output`, rename `temp` to `output`.
///
/// Missing `input` or `output` is not an error.
pub fn swap(input: &Path, output: &Path, temp: &Path) -> Result<(), PipelineError> {
    let replacement_err = |step: &str, path: &Path, e: io::Error| PipelineError::Replacement {
        temp: temp.to_path_buf(),
        message: format!("{step} '{}': {e}", path.display()),
    };

    remove_if_present(input).map_err(|e| replacement_err("remove", input, e))?;
    remove_if_present(output).map_err(|e| replacement_err("remove", output, e))?;
    std::fs::rename(temp, output).map_err(|e| replacement_err("rename to", output, e))?;

    log::debug!("{} replaced by {}", input.display(), output.display());
    Ok(())
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
