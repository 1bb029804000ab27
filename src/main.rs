//! Ruthscore - static conformance scorer for the RUTH V2 coaching agent
//!
//! Reads the agent's source artifacts, scores them against a fixed
//! 100-point rubric and exits 0 when the total reaches the pass threshold.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use cli::{Cli, OutputFormat};
use ruthscore_core::error::{ExitCode as ScoreExitCode, ScoreError};
use ruthscore_core::logging;
use ruthscore_core::Verdict;

fn main() -> ExitCode {
    let start = Instant::now();

    let argv_format_json = argv_requests_json();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap fails before `Cli.format` exists, so look at argv for JSON
            if argv_format_json {
                let score_error = match err.kind() {
                    clap::error::ErrorKind::DisplayHelp
                    | clap::error::ErrorKind::DisplayVersion => err.exit(),
                    clap::error::ErrorKind::ValueValidation
                    | clap::error::ErrorKind::InvalidValue
                    | clap::error::ErrorKind::UnknownArgument
                    | clap::error::ErrorKind::ArgumentConflict
                    | clap::error::ErrorKind::MissingRequiredArgument => {
                        ScoreError::UsageError(err.to_string())
                    }
                    _ => ScoreError::Other(err.to_string()),
                };

                eprintln!("{}", score_error.to_json());
                return ExitCode::from(score_error.exit_code() as u8);
            }

            err.exit();
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::score::execute(&cli, start) {
        Ok(Verdict::Pass) => ExitCode::from(ScoreExitCode::Success as u8),
        Ok(Verdict::Review) => ExitCode::from(ScoreExitCode::Failure as u8),
        Err(e) => {
            let exit_code = e.exit_code();

            if cli.format == OutputFormat::Json {
                eprintln!("{}", e.to_json());
            } else {
                eprintln!("error: {}", e);
            }

            ExitCode::from(exit_code as u8)
        }
    }
}

fn argv_requests_json() -> bool {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--format" {
            if args.next().is_some_and(|v| v == "json") {
                return true;
            }
        } else if arg == "--format=json" {
            return true;
        }
    }
    false
}
