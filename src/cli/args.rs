//! CLI argument definitions using clap
//!
//! Commands:
//! - plantdb serve [--config <path>] [--port <n>]
//! - plantdb seed [--config <path>] [--species <file>] [--occurrences <file>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// plantdb - HTTP front-end for plant species and occurrence records
#[derive(Parser, Debug)]
#[command(name = "plantdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Bulk-load seed files into the configured data directory
    Seed {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// JSON array of species records
        #[arg(long)]
        species: Option<PathBuf>,

        /// JSON array of partial occurrence records
        #[arg(long)]
        occurrences: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["plantdb", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Command::Serve { config, port } => {
                assert_eq!(config, None);
                assert_eq!(port, Some(9000));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_seed() {
        let cli = Cli::try_parse_from([
            "plantdb",
            "seed",
            "--config",
            "plantdb.json",
            "--occurrences",
            "misc.json",
        ])
        .unwrap();
        match cli.command {
            Command::Seed {
                config,
                species,
                occurrences,
            } => {
                assert_eq!(config, Some(PathBuf::from("plantdb.json")));
                assert_eq!(species, None);
                assert_eq!(occurrences, Some(PathBuf::from("misc.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
