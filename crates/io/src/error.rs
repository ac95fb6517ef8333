use std::fmt;
use std::path::PathBuf;

/// Fatal pipeline failures. Malformed rows are not errors; see `ReadOutcome::skipped`.
#[derive(Debug)]
pub enum PipelineError {
    /// Input file does not exist.
    InputNotFound { path: PathBuf },
    /// Input exists but could not be opened, read, decoded or parsed.
    InputRead { path: PathBuf, message: String },
    /// Writing the temp file failed. The temp file has been removed.
    OutputWrite { path: PathBuf, message: String },
    /// A delete or rename during the swap failed. `temp` still holds the output.
    Replacement { temp: PathBuf, message: String },
    /// File names rejected before anything is read.
    InvalidSettings { message: String },
}

impl PipelineError {
    /// Where the processed data can be recovered from, if anywhere.
    pub fn recovery_path(&self) -> Option<&PathBuf> {
        match self {
            Self::Replacement { temp, .. } => Some(temp),
            _ => None,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputNotFound { path } => {
                write!(f, "The file '{}' was not found.", path.display())
            }
            Self::InputRead { path, message } => {
                write!(f, "cannot read '{}': {message}", path.display())
            }
            Self::OutputWrite { path, message } => {
                write!(f, "cannot write '{}': {message}", path.display())
            }
            Self::Replacement { temp, message } => {
                write!(f, "cannot replace files (data kept in '{}'): {message}", temp.display())
            }
            Self::InvalidSettings { message } => write!(f, "invalid settings: {message}"),
        }
    }
}

impl std::error::Error for PipelineError {}
