//! CLI module for the student records service
//!
//! Provides:
//! - serve: run the HTTP backend
//! - list / show: read students through the client layer
//! - add / edit: fill the student form and submit it
//! - delete: confirmed delete through the list controller

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, ClientArgs, Command, FormFields};
pub use commands::{add, delete, edit, list, run, run_command, serve, show};
pub use errors::{CliError, CliErrorCode, CliResult};
