use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;

const DEFAULT_DATA_FILE: &str = "inventory.json";
const DEFAULT_CURRENCY: &str = "Rs";
const DEFAULT_LOG_LEVEL: &str = "warn";
const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Interactive inventory tracker.
#[derive(Debug, Parser)]
#[command(name = "inventory", version)]
pub struct CliArgs {
    /// Snapshot file loaded at startup and written on exit
    #[arg(long, env = "INVENTORY_DATA_FILE", default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Label printed in front of money amounts
    #[arg(long, env = "INVENTORY_CURRENCY", default_value = DEFAULT_CURRENCY)]
    pub currency: String,

    /// Log filter used when RUST_LOG is not set (logs go to stderr)
    #[arg(long, env = "INVENTORY_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,

    /// Mailbox size of the inventory actor
    #[arg(long, default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub currency: String,
    pub log_level: String,
    pub channel_capacity: usize,
}

impl AppConfig {
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let config = Self {
            data_file: args.data_file,
            currency: args.currency.trim().to_string(),
            log_level: args.log_level,
            channel_capacity: args.channel_capacity,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            !self.data_file.as_os_str().is_empty(),
            "data file path must not be empty"
        );
        ensure!(
            self.channel_capacity >= 1,
            "channel capacity must be at least 1"
        );
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            currency: DEFAULT_CURRENCY.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
