//! Caisse CLI - Point-of-sale register for the store server.
//!
//! Commands:
//! - `caisse register` - Open an interactive register session
//! - `caisse sale-info` - Show the invoice data of a sale
//! - `caisse invoice-url` - Print the printable invoice address
//! - `caisse config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;
mod terminal;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, RegisterArgs, SaleArgs};

/// Caisse CLI - Ring up sales against the store server
#[derive(Parser)]
#[command(name = "caisse")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the register
    Register(RegisterArgs),

    /// Show the invoice data of a recorded sale
    SaleInfo(SaleArgs),

    /// Print the printable invoice address of a sale
    InvoiceUrl(SaleArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Register(args) => commands::register::run(args, &ctx).await,
        Commands::SaleInfo(args) => commands::sale::info(args, &ctx).await,
        Commands::InvoiceUrl(args) => commands::sale::invoice_url(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
