//! Use-case layer between the shell and the repositories.
//!
//! # Responsibility
//! - Expose the data-access facade as the only entry point for callers.
//! - Keep the shell decoupled from SQL and repository details.

pub mod facade;
