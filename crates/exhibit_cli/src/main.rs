//! `exhibit` entry point.
//!
//! # Responsibility
//! - Parse flags and start logging.
//! - Hand stdin/stdout to the startup sequence and map its result to an
//!   exit code.
//!
//! # Invariants
//! - Configuration and store-open failures are fatal: message + exit code 1.
//! - Logging failures are reported but never stop the shell.
//! - Buffered log lines are flushed before every exit.

use clap::Parser;
use exhibit_cli::{report_fatal, run};
use exhibit_core::config::DEFAULT_CONFIG_FILE;
use exhibit_core::{default_log_level, flush_logging, init_logging};
use log::{error, info};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "exhibit")]
#[command(version)]
#[command(about = "Console manager for exhibition visitors, exhibitions and tickets")]
struct Cli {
    /// Path to the key=value connection config file
    #[arg(short, long, env = "EXHIBIT_CONFIG", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Directory for rolling log files
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// Log level: trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    start_logging(&cli);

    let result = run(&cli.config, io::stdin().lock(), io::stdout().lock());
    let code = match result {
        Ok(()) => {
            info!("event=app_exit module=cli status=ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=app_exit module=cli status=error error={err}");
            // A failed write to stderr leaves nowhere else to report.
            let _ = report_fatal(&err, io::stderr().lock());
            ExitCode::FAILURE
        }
    };
    flush_logging();
    code
}

fn start_logging(cli: &Cli) {
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    let log_dir = std::path::absolute(&cli.log_dir).unwrap_or_else(|_| cli.log_dir.clone());
    if let Err(err) = init_logging(level, &log_dir) {
        eprintln!("Warning: logging disabled: {err}");
    }
}
