//! CLI command implementations.

pub mod config;
pub mod register;
pub mod sale;

use clap::{Args, Subcommand};

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Payment mode selected at start (CASH, CARD, ...).
    #[arg(short, long)]
    pub payment_mode: Option<String>,

    /// Answer yes to every confirmation.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the sale lookup commands.
#[derive(Args)]
pub struct SaleArgs {
    /// Sale identifier returned by checkout.
    pub sale_id: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration.
    Show,
    /// Create a caisse.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,

        /// Store server URL.
        #[arg(long, default_value = "http://127.0.0.1:8000/")]
        base_url: String,
    },
    /// Check the configuration for errors.
    Validate,
}
