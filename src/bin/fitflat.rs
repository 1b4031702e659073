//! Fitflat CLI - batch FIT to CSV conversion
//!
//! Commands:
//! - convert: Flatten a directory of .fit files into one CSV

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use fitflat::pipeline::{self, ConvertOptions};
use fitflat::{ConvertError, DEFAULT_TIMEZONE, FITFLAT_VERSION};

/// Fitflat - flatten FIT activity files into a single CSV
#[derive(Parser)]
#[command(name = "fitflat")]
#[command(version = FITFLAT_VERSION)]
#[command(about = "Flatten FIT activity files into a single CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten every .fit file under a directory into one CSV
    Convert {
        /// Directory holding the .fit input files
        #[arg(long, default_value = ".")]
        input_directory: PathBuf,

        /// Output .csv file name
        #[arg(long, default_value = "out.csv")]
        output_file: PathBuf,

        /// Logging level (error, warn, info, debug, trace)
        #[arg(long, default_value = "info")]
        log_level: String,

        /// Display timezone (IANA format, e.g. "US/Eastern")
        #[arg(long, default_value = DEFAULT_TIMEZONE)]
        timezone: String,

        /// Also look one directory level below the input directory
        #[arg(long)]
        recursive: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), ConvertError> {
    match cli.command {
        Commands::Convert {
            input_directory,
            output_file,
            log_level,
            timezone,
            recursive,
        } => {
            init_logging(&log_level);

            let options = ConvertOptions {
                input_directory,
                output_file,
                timezone,
                recursive,
            };
            pipeline::run(&options)?;
            Ok(())
        }
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::new()
        .parse_filters(level)
        .format_timestamp_secs()
        .init();
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<ConvertError> for CliError {
    fn from(e: ConvertError) -> Self {
        match e {
            ConvertError::Decode { .. } => CliError {
                code: "DECODE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Ensure the input is a valid FIT activity file".to_string()),
            },
            ConvertError::Timestamp(_) => CliError {
                code: "TIMESTAMP_ERROR".to_string(),
                message: e.to_string(),
                hint: None,
            },
            ConvertError::InvalidTimezone(_) => CliError {
                code: "TIMEZONE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Use an IANA zone name such as US/Eastern".to_string()),
            },
            ConvertError::Io(_) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            ConvertError::Csv(_) => CliError {
                code: "CSV_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check that the output path is writable".to_string()),
            },
        }
    }
}
