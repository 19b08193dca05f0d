use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use voucher_print::adapters::directory::HttpDirectory;
use voucher_print::config::seed::SeedConfig;
use voucher_print::domain::ports::{PortalDirectory, VoucherStore};
use voucher_print::http::{self, AppState};
use voucher_print::utils::{logger, validation::Validate};
use voucher_print::{CliConfig, PrintWorkflow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting voucher-print");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let seed = SeedConfig::from_file(&config.seed)
        .with_context(|| format!("loading seed file {}", config.seed))?;
    seed.validate().context("seed file failed validation")?;

    let (store, seeded_directory) = seed.build();
    let store = Arc::new(store);

    for roll in &seed.rolls {
        let available = store.available_count(roll.id).await?;
        tracing::info!(roll = roll.id, name = %roll.name, available, "Loaded roll");
    }

    let directory: Arc<dyn PortalDirectory> = match &config.directory_url {
        Some(url) => {
            tracing::info!("Using external portal directory at {url}");
            Arc::new(HttpDirectory::new(url))
        }
        None => {
            tracing::info!(portals = seed.portals.len(), "Using seed-file portal directory");
            Arc::new(seeded_directory)
        }
    };

    let workflow = PrintWorkflow::new(store, directory);
    let state = AppState::new(workflow);

    http::serve(state, &config.listen_address()).await?;
    Ok(())
}
