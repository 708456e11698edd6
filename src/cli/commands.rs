//! CLI command implementations
//!
//! Each command loads configuration, initialises logging, then drives a
//! tokio runtime to completion.

use std::path::Path;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::model::Species;
use crate::observability::init_logging;
use crate::rest_api::RestServer;
use crate::seed::{load_seed_file, seed_occurrences, seed_species, SeedOccurrence};
use crate::store::{LocalStore, MemoryStore, RecordStore};

/// Run the CLI with parsed arguments
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run a specific command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve { config, port } => serve(config.as_deref(), port),
        Command::Seed {
            config,
            species,
            occurrences,
        } => seed(config.as_deref(), species.as_deref(), occurrences.as_deref()),
    }
}

fn runtime() -> CliResult<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create runtime: {}", e)))
}

/// Start the HTTP server and block until it stops
pub fn serve(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load_or_default(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;
    init_logging(config.log_format);

    runtime()?.block_on(async {
        match config.data_path() {
            Some(dir) => {
                let store = LocalStore::open(dir, config.table_list())
                    .await
                    .map_err(|e| CliError::boot_failed(format!("Failed to open store: {}", e)))?;
                info!(data_dir = %dir.display(), "using file-backed store");
                serve_with(store, &config).await
            }
            None => {
                info!("no data_dir configured, using in-memory store");
                serve_with(MemoryStore::with_tables(config.table_list()), &config).await
            }
        }
    })
}

async fn serve_with<S: RecordStore + 'static>(store: S, config: &Config) -> CliResult<()> {
    let router = RestServer::new(Arc::new(store), config.tables()).router();
    HttpServer::new(config.server.clone(), router)
        .start()
        .await
        .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
}

/// Bulk-load seed files into the configured data directory
pub fn seed(
    config_path: Option<&Path>,
    species: Option<&Path>,
    occurrences: Option<&Path>,
) -> CliResult<()> {
    let config = Config::load_or_default(config_path)?;
    let data_dir = config
        .data_path()
        .ok_or_else(|| CliError::config_error("seeding requires data_dir to be configured"))?;
    if species.is_none() && occurrences.is_none() {
        return Err(CliError::config_error(
            "nothing to seed: pass --species and/or --occurrences",
        ));
    }
    init_logging(config.log_format);

    runtime()?.block_on(async {
        let store = LocalStore::open(data_dir, config.table_list())
            .await
            .map_err(|e| CliError::seed_failed(format!("Failed to open store: {}", e)))?;

        if let Some(path) = species {
            let records: Vec<Species> = load_seed_file(path).await?;
            seed_species(&store, &config.species_table, records).await?;
        }

        if let Some(path) = occurrences {
            let records: Vec<SeedOccurrence> = load_seed_file(path).await?;
            let mut rng = StdRng::from_entropy();
            seed_occurrences(&store, &config.occurrences_table, records, &mut rng).await?;
        }

        Ok(())
    })
}
