//! Read → transform → write temp → swap.
//!
//! Progress lines go to the caller's writer (stdout in the binary). Each
//! stage runs once; there are no retries and no rollback.

use std::fmt;
use std::io::{BufRead, Write};
use std::path::Path;

use imgtag_config::Settings;
use imgtag_engine::transform_all;
use imgtag_io::{csv, swap, PipelineError};

/// Where the run is, or where it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Read,
    Transform,
    WriteTemp,
    Swap,
    Done,
    ReadFailed,
    WriteFailed,
    SwapFailed,
}

impl Stage {
    /// The stage reached when `err` aborts the run.
    ///
    /// Settings are checked before the run leaves `Start`.
    pub fn failed_with(err: &PipelineError) -> Self {
        match err {
            PipelineError::InvalidSettings { .. } => Self::Start,
            PipelineError::InputNotFound { .. } | PipelineError::InputRead { .. } => {
                Self::ReadFailed
            }
            PipelineError::OutputWrite { .. } => Self::WriteFailed,
            PipelineError::Replacement { .. } => Self::SwapFailed,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Done | Self::ReadFailed | Self::WriteFailed | Self::SwapFailed
        )
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::Read => "read",
            Self::Transform => "transform",
            Self::WriteTemp => "write_temp",
            Self::Swap => "swap",
            Self::Done => "done",
            Self::ReadFailed => "read_failed",
            Self::WriteFailed => "write_failed",
            Self::SwapFailed => "swap_failed",
        };
        f.write_str(name)
    }
}

/// Counts from a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub written: usize,
    pub skipped: usize,
}

/// A run that stopped early.
#[derive(Debug)]
pub struct RunFailure {
    pub stage: Stage,
    pub error: PipelineError,
}

impl fmt::Display for RunFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.error, self.stage)
    }
}

impl std::error::Error for RunFailure {}

struct Progress<'a> {
    stage: Stage,
    out: &'a mut dyn Write,
}

impl Progress<'_> {
    fn enter(&mut self, next: Stage) {
        log::debug!("stage {} -> {}", self.stage, next);
        if next.is_terminal() {
            log::info!("run finished in stage {next}");
        }
        self.stage = next;
    }

    fn say(&mut self, line: impl fmt::Display) {
        if let Err(e) = writeln!(self.out, "{line}") {
            log::debug!("console write failed: {e}");
        }
    }

    fn fail(&mut self, error: PipelineError) -> RunFailure {
        let stage = Stage::failed_with(&error);
        self.enter(stage);
        RunFailure { stage, error }
    }
}

/// Run the whole pipeline with file names from `settings`, resolved against `base`.
pub fn run_pipeline(
    settings: &Settings,
    base: &Path,
    out: &mut dyn Write,
) -> Result<RunSummary, RunFailure> {
    settings.validate().map_err(|message| {
        let error = PipelineError::InvalidSettings { message };
        RunFailure { stage: Stage::failed_with(&error), error }
    })?;

    let names = &settings.files;
    let input = settings.input_path(base);
    let output = settings.output_path(base);
    let temp = settings.temp_path(base);

    let mut progress = Progress { stage: Stage::Start, out };

    progress.enter(Stage::Read);
    progress.say(format_args!("Reading data from {}...", names.input.display()));
    let outcome = csv::read_records(&input).map_err(|e| progress.fail(e))?;

    for row in &outcome.skipped {
        progress.say(format_args!("Skipping malformed row: {row}"));
    }

    progress.enter(Stage::Transform);
    let skipped = outcome.skipped_count();
    let records = transform_all(outcome.records);
    progress.say(format_args!(
        "Processing complete. Found {} valid rows.",
        records.len()
    ));
    if skipped > 0 {
        progress.say(format_args!("Skipped {skipped} malformed row(s)."));
    }

    progress.enter(Stage::WriteTemp);
    progress.say(format_args!(
        "Writing processed data to temporary file {} (will be renamed to {})...",
        names.temp.display(),
        names.output.display()
    ));
    swap::write_temp(&records, &temp).map_err(|e| progress.fail(e))?;
    progress.say(format_args!("Temporary file {} created.", names.temp.display()));

    progress.enter(Stage::Swap);
    progress.say(format_args!(
        "Replacing original file {} with {}...",
        names.input.display(),
        names.output.display()
    ));
    swap::swap(&input, &output, &temp).map_err(|e| progress.fail(e))?;

    progress.enter(Stage::Done);
    progress.say(format_args!(
        "File processing complete. {} has been created.",
        names.output.display()
    ));

    Ok(RunSummary {
        written: records.len(),
        skipped,
    })
}

/// Print `prompt` and wait for one line. EOF or a read error ends the wait.
pub fn pause(prompt: &str, input: &mut dyn BufRead, out: &mut dyn Write) {
    let _ = write!(out, "{prompt}");
    let _ = out.flush();
    let mut line = String::new();
    if let Err(e) = input.read_line(&mut line) {
        log::debug!("pause: stdin read failed: {e}");
    }
}
