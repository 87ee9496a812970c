//! Console shell for the exhibition ticketing manager.

pub mod input;
pub mod shell;
pub mod startup;

pub use input::ValidationError;
pub use shell::Shell;
pub use startup::{report_fatal, run, StartupError};
