use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use cpacalc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for cpacalc::AppCommand {
    fn from(cmd: Commands) -> cpacalc::AppCommand {
        match cmd {
            Commands::Show => cpacalc::AppCommand::Show,
            Commands::Set {
                lifetime_profit,
                budget_pct,
                conversion_pct,
            } => cpacalc::AppCommand::Set {
                lifetime_profit,
                acquisition_budget_pct: budget_pct,
                conversion_rate_pct: conversion_pct,
            },
            Commands::Currency { symbol } => cpacalc::AppCommand::Currency { symbol },
            Commands::Reset => cpacalc::AppCommand::Reset,
            Commands::Save => cpacalc::AppCommand::Save,
            Commands::History => cpacalc::AppCommand::History,
            Commands::Serve { port } => cpacalc::AppCommand::Serve { port },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display current inputs and derived metrics
    Show,
    /// Update one or more calculator inputs
    Set {
        /// Expected net profit from one customer (conventionally 500-100000)
        #[arg(long)]
        lifetime_profit: Option<f64>,
        /// Share of lifetime profit spent on acquisition, in percent (conventionally 5-100)
        #[arg(long)]
        budget_pct: Option<f64>,
        /// Share of leads that convert, in percent (conventionally 1-100)
        #[arg(long)]
        conversion_pct: Option<f64>,
    },
    /// Choose the display currency symbol
    Currency {
        /// One of: ₹ $ € £ AED (unknown symbols fall back to ₹)
        symbol: String,
    },
    /// Restore the default inputs
    Reset,
    /// Save the current calculation to the backend history
    Save,
    /// List calculations saved to the backend history
    History,
    /// Run the calculations API server
    Serve {
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => cpacalc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = cpacalc::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
api:
  base_url: "http://localhost:5000"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
