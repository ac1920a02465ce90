//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;

/// Terminal shopping cart.
#[derive(Debug, Parser)]
#[command(name = "tcart")]
#[command(version, about = "A terminal shopping cart")]
pub struct Cli {
    /// JSON file with the products to start the cart with
    #[arg(long, env = "TCART_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Currency symbol shown in front of prices
    #[arg(long, env = "TCART_CURRENCY", default_value = "$")]
    pub currency: String,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long, env = "TCART_LOG")]
    pub log_file: Option<PathBuf>,

    /// Replay actions from a JSON-lines file and print the resulting cart
    #[arg(long)]
    pub script: Option<PathBuf>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub catalog: Option<PathBuf>,
    pub currency: String,
    pub log_file: Option<PathBuf>,
    pub script: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: None,
            currency: "$".to_string(),
            log_file: None,
            script: None,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            catalog: cli.catalog,
            currency: cli.currency,
            log_file: cli.log_file,
            script: cli.script,
        }
    }
}
