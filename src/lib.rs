pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod history;
pub mod server;
pub mod state;

use anyhow::Result;
use tracing::{debug, info};

use crate::state::CalculatorState;

pub enum AppCommand {
    Show,
    Set {
        lifetime_profit: Option<f64>,
        acquisition_budget_pct: Option<f64>,
        conversion_rate_pct: Option<f64>,
    },
    Currency {
        symbol: String,
    },
    Reset,
    Save,
    History,
    Serve {
        port: u16,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    if let AppCommand::Serve { port } = command {
        let database_url = config.database_url()?;
        return server::run(port, &database_url).await;
    }

    let snapshots = state::SnapshotStore::open(&config.data_path()?)?;

    match command {
        AppCommand::Show => {
            cli::show::run(&snapshots.load());
        }
        AppCommand::Set {
            lifetime_profit,
            acquisition_budget_pct,
            conversion_rate_pct,
        } => {
            let mut current = snapshots.load();
            // Each field is its own mutation, mirrored immediately.
            if let Some(value) = lifetime_profit {
                current.lifetime_profit = value;
                snapshots.save(&current)?;
            }
            if let Some(value) = acquisition_budget_pct {
                current.acquisition_budget_pct = value;
                snapshots.save(&current)?;
            }
            if let Some(value) = conversion_rate_pct {
                current.conversion_rate_pct = value;
                snapshots.save(&current)?;
            }
            cli::show::run(&current);
        }
        AppCommand::Currency { symbol } => {
            let mut current = snapshots.load();
            let currency = core::currency::find_by_symbol(&symbol);
            if currency.symbol != symbol {
                println!(
                    "{}",
                    cli::ui::style_text(
                        &format!("Unknown currency '{symbol}', using {}", currency.name),
                        cli::ui::StyleType::Subtle
                    )
                );
            }
            current.currency = currency.symbol.to_string();
            snapshots.save(&current)?;
            info!("Display currency set to {}", currency.name);
            println!(
                "Display currency set to {} ({}).",
                currency.symbol, currency.name
            );
        }
        AppCommand::Reset => {
            snapshots.save(&CalculatorState::default())?;
            println!(
                "{}",
                cli::ui::style_text("Reset to defaults", cli::ui::StyleType::Label)
            );
            println!("All values have been restored to their initial state.");
        }
        AppCommand::Save => {
            let provider = history::HttpHistoryProvider::new(&config.api.base_url);
            cli::save::run(&snapshots.load(), &provider).await?;
        }
        AppCommand::History => {
            let provider = history::HttpHistoryProvider::new(&config.api.base_url);
            cli::history::run(&provider).await?;
        }
        AppCommand::Serve { .. } => unreachable!("Serve is handled before the snapshot store"),
    }

    Ok(())
}
