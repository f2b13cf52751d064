//! vform CLI
//!
//! Drives scripted forms through change, blur and submit events and prints
//! the field state and validation summary after every step.

use std::fs::File;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode, WriteLogger};
use vform::prelude::TimingConfig;

mod scenarios;

#[derive(Parser)]
#[command(name = "vform")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run scripted validated forms", long_about = None)]
struct Cli {
    /// Log to the terminal instead of vform-cli.log
    #[arg(short, long)]
    verbose: bool,

    /// Timing override as JSON, e.g. '{"validateOnSubmit": true}'
    #[arg(short, long)]
    timing: Option<String>,

    /// Scenario to run
    #[arg(value_enum, default_value = "per-input")]
    scenario: Scenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Field-level rules with live validation
    PerInput,
    /// One schema for the whole form
    FormSchema,
    /// A form-level validate function
    FormValidate,
    /// Nested value paths
    Nested,
    /// A field mounted and unmounted by a switch
    Dynamic,
    /// Validation deferred until submit
    SubmitOnly,
    /// Summary with click-to-focus entries
    Summary,
    /// Error, warning and info messages on one form
    Severities,
    /// Every field kind
    AllInputs,
}

fn init_logging(verbose: bool) {
    if verbose {
        let _ = TermLogger::init(
            LevelFilter::Debug,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        );
    } else if let Ok(log_file) = File::create("vform-cli.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), log_file);
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let timing = match cli.timing.as_deref().map(TimingConfig::from_json) {
        Some(Ok(timing)) => Some(timing),
        Some(Err(e)) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
        None => None,
    };

    info!("Running scenario {:?}", cli.scenario);
    scenarios::run(cli.scenario, timing);
    ExitCode::SUCCESS
}
