// imgtag - retag images.txt into a fully-quoted images.csv
// Takes no options; file names are fixed in imgtag-config.

use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use imgtag_cli::exit_codes::{pipeline_exit_code, EXIT_SUCCESS};
use imgtag_cli::pipeline::{pause, run_pipeline, RunFailure};
use imgtag_config::Settings;
use imgtag_io::PipelineError;

#[derive(Parser)]
#[command(name = "imgtag")]
#[command(about = "Rewrite images.txt as images.csv, tagging each image 'forsale' or 'sold'")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {}

fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("GIT_COMMIT_HASH"), ")",
        "\ntarget:  ", env!("TARGET"),
    )
}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let settings = Settings::default();
    let stdout = io::stdout();

    let result = run_pipeline(&settings, Path::new(""), &mut stdout.lock())
        .map_err(|failure| CliError::from_failure(&failure, &settings));

    let (code, prompt) = match result {
        Ok(summary) => {
            log::info!(
                "wrote {} record(s), skipped {}",
                summary.written,
                summary.skipped
            );
            (EXIT_SUCCESS, "Press Enter to finish...")
        }
        Err(CliError { code, message, hint }) => {
            let mut handle = stdout.lock();
            let _ = writeln!(handle, "{}", message);
            if let Some(hint) = hint {
                let _ = writeln!(handle, "{}", hint);
            }
            (code, "Press Enter to exit...")
        }
    };

    if settings.pause_on_exit {
        pause(prompt, &mut io::stdin().lock(), &mut stdout.lock());
    }

    ExitCode::from(code)
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    fn from_failure(failure: &RunFailure, settings: &Settings) -> Self {
        let err = &failure.error;
        log::error!("pipeline stopped: {failure}");

        let message = match err {
            PipelineError::InputNotFound { .. } => format!(
                "Error: The file '{}' was not found.",
                settings.files.input.display()
            ),
            PipelineError::InputRead { message, .. } => {
                format!("An error occurred while reading the file: {message}")
            }
            PipelineError::OutputWrite { message, .. } => {
                format!("An error occurred while writing to the temporary file: {message}")
            }
            PipelineError::Replacement { message, .. } => {
                format!("An error occurred while replacing the original file: {message}")
            }
            PipelineError::InvalidSettings { message } => format!("Error: {message}"),
        };

        let hint = err.recovery_path().map(|_| {
            format!(
                "The processed data is still available in {}.",
                settings.files.temp.display()
            )
        });

        Self { code: pipeline_exit_code(err), message, hint }
    }
}
