//! Startup sequence: configuration, store, shell, shutdown.
//!
//! # Invariants
//! - The store is only opened after the configuration loaded completely.
//! - Any `StartupError` is fatal; the binary reports it and exits with 1.

use crate::shell::Shell;
use exhibit_core::{
    core_version, ConfigError, DatabaseConfig, DatabaseFacade, DbError, RepoError, Store,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Fatal failure before or around the interactive session.
#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    Store(DbError),
    Schema(RepoError),
    Console(io::Error),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "failed to open the database: {err}"),
            Self::Schema(err) => write!(f, "database is not usable: {err}"),
            Self::Console(err) => write!(f, "console I/O failed: {err}"),
        }
    }
}

impl Error for StartupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Store(err) => Some(err),
            Self::Schema(err) => Some(err),
            Self::Console(err) => Some(err),
        }
    }
}

impl From<ConfigError> for StartupError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for StartupError {
    fn from(value: DbError) -> Self {
        Self::Store(value)
    }
}

impl From<RepoError> for StartupError {
    fn from(value: RepoError) -> Self {
        Self::Schema(value)
    }
}

impl From<io::Error> for StartupError {
    fn from(value: io::Error) -> Self {
        Self::Console(value)
    }
}

/// Loads `config_path`, opens the store and runs the shell until exit.
pub fn run<R, W>(config_path: &Path, input: R, mut output: W) -> Result<(), StartupError>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "Exhibition management system v{}", core_version())?;
    writeln!(output, "Loading configuration from {}", config_path.display())?;
    let config = DatabaseConfig::load(config_path)?;
    writeln!(output, "Configuration loaded")?;

    let store = Store::open_with(&config)?;
    {
        let facade = DatabaseFacade::try_new(&store)?;
        info!("event=app_ready module=cli status=ok");
        writeln!(output, "Connected to database `{}`", config.database)?;
        Shell::new(&facade, input, &mut output).run()?;
    }
    store.close()?;
    Ok(())
}

/// Writes the fatal-error line shown before a non-zero exit.
pub fn report_fatal(err: &StartupError, mut output: impl Write) -> io::Result<()> {
    writeln!(output, "\nError: {err}")?;
    output.flush()
}
