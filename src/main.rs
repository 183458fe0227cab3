mod actor_framework;
mod app_system;
mod clients;
mod config;
mod domain;
mod error;
mod inventory;
mod menu;
mod persistence;

#[cfg(test)]
mod mock_framework;

use std::process::ExitCode;

use clap::Parser;
use tokio::io::BufReader;
use tracing::{error, info};

use crate::app_system::{setup_tracing, InventorySystem};
use crate::config::{AppConfig, CliArgs};
use crate::menu::{Menu, MenuExit};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    let config = AppConfig::from_args(CliArgs::parse())?;
    setup_tracing(&config.log_level);

    info!(data_file = %config.data_file.display(), "Starting inventory tracker");

    let system = InventorySystem::start(&config);

    let mut menu = Menu::new(
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        system.client.clone(),
        config.currency.clone(),
    );
    let outcome = menu.run().await;
    drop(menu);

    // Join the actor even when the menu failed so the shutdown is logged.
    system.shutdown().await?;

    match outcome {
        Ok(MenuExit::Saved) => Ok(ExitCode::SUCCESS),
        Ok(MenuExit::Discarded) => Ok(ExitCode::FAILURE),
        Err(e) => {
            error!(error = %e, "Menu terminated unexpectedly");
            Err(e)
        }
    }
}
