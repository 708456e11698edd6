//! # CLI Module
//!
//! Command-line entry for the plantdb server:
//!
//! - `plantdb serve` runs the HTTP API
//! - `plantdb seed` bulk-loads species and occurrence seed files

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, seed, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
