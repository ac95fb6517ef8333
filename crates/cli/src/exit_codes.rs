//! CLI Exit Code Registry
//!
//! Single source of truth for the exit codes of `imgtag`.
//! Scripts rely on them.
//!
//! | Code | Meaning                                                       |
//! |------|---------------------------------------------------------------|
//! | 0    | Success                                                       |
//! | 1    | Fatal error: missing input, read, write, or replacement error |
//! | 2    | CLI usage error (emitted by clap itself)                      |

use imgtag_io::PipelineError;

/// Success - input retagged and replaced by the output file.
pub const EXIT_SUCCESS: u8 = 0;

/// Fatal error - any stage of the pipeline failed.
pub const EXIT_ERROR: u8 = 1;

/// Map a pipeline error to its exit code.
///
/// Every pipeline failure currently shares `EXIT_ERROR`.
pub fn pipeline_exit_code(err: &PipelineError) -> u8 {
    match err {
        PipelineError::InputNotFound { .. }
        | PipelineError::InputRead { .. }
        | PipelineError::OutputWrite { .. }
        | PipelineError::Replacement { .. }
        | PipelineError::InvalidSettings { .. } => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn all_pipeline_errors_exit_one() {
        let errs = [
            PipelineError::InputNotFound { path: PathBuf::from("a") },
            PipelineError::InputRead { path: PathBuf::from("a"), message: String::new() },
            PipelineError::OutputWrite { path: PathBuf::from("t"), message: String::new() },
            PipelineError::Replacement { temp: PathBuf::from("t"), message: String::new() },
            PipelineError::InvalidSettings { message: String::new() },
        ];
        for err in &errs {
            assert_eq!(pipeline_exit_code(err), EXIT_ERROR);
        }
    }
}
