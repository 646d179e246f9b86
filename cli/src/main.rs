//! `aidchain`: donate, validate and distribute from the command line.
//!
//! Signing goes through an external signer bridge; every result is mirrored
//! into a local LMDB record store.

mod app;
mod commands;
mod config;
mod prompt;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use aidchain_distribution::RequestFilter;
use aidchain_utils::{init_logging, LogFormat};

use crate::app::App;
use crate::config::CliConfig;

#[derive(Parser)]
#[command(name = "aidchain", about = "Transparent aid donations and distribution")]
struct Cli {
    /// Path to a TOML configuration file. File settings are the base; CLI
    /// flags and env vars override them.
    #[arg(long, env = "AIDCHAIN_CONFIG")]
    config: Option<PathBuf>,

    /// Directory of the local record store.
    #[arg(long, env = "AIDCHAIN_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// JSON-RPC endpoint of the signer bridge.
    #[arg(long, env = "AIDCHAIN_SIGNER_URL")]
    signer_url: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AIDCHAIN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AIDCHAIN_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Donate to the aid contract.
    Donate {
        #[arg(long)]
        category: String,
        #[arg(long, default_value = "")]
        message: String,
        /// Amount in display units, e.g. "10" or "2.5".
        #[arg(long)]
        amount: String,
    },
    /// Donate towards a specific distribution request.
    Contribute {
        id: String,
        #[arg(long)]
        amount: String,
    },
    /// Validate a distribution request as the current signer.
    Validate { id: String },
    /// Mark a ready request as distributed.
    Distribute {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// List distribution requests.
    Requests {
        /// all, active, ready or high.
        #[arg(long, default_value = "all")]
        filter: RequestFilter,
    },
    /// Top donors by rewards earned.
    Leaderboard {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Donation and validation statistics.
    Stats,
    /// Print the block explorer link for a transaction.
    Explorer { tx: String },
    /// Connect the wallet and print the address.
    Connect,
}

impl Cli {
    /// File config (or defaults) with flags and env vars applied on top.
    fn resolve_config(&self) -> anyhow::Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::from_toml_file(path)?,
            None => CliConfig::default(),
        };
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(url) = &self.signer_url {
            config.signer_url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    init_logging(config.log_format, &config.log_level)?;

    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    let app = App::open(config)?;
    commands::run(cli.command, &app).await
}
