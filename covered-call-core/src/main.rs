use anyhow::{bail, Result};
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use covered_call_core::{
    page::{targets, ConsolePage, MemoryPage},
    service::{BacktestForm, SubmitOutcome},
    AppState,
};

#[derive(Parser)]
#[command(name = "covered-call")]
#[command(about = "Command-line driver for the covered call dashboard backend")]
enum Commands {
    /// Ping the backend health endpoint
    Health,
    /// Print the backend status document
    Status,
    /// Run a backtest and print the results
    Backtest {
        #[arg(short, long, default_value = "SPY")]
        ticker: String,
        #[arg(long)]
        start_date: String,
        #[arg(long)]
        end_date: String,
        #[arg(long, default_value = "call")]
        option_type: String,
        #[arg(long, default_value = "1")]
        deviation: String,
        #[arg(long, default_value = "200")]
        stop_loss: String,
    },
    /// Update stock data, options data and models in sequence
    UpdateModels,
}

const CONSOLE_TEMPLATE: &[&str] = &[
    targets::BACKTEST_FORM,
    targets::BACKTEST_LOADING,
    targets::BACKTEST_RESULTS,
    targets::BACKTEST_CHART,
    targets::SPINNER,
    targets::LOG,
    targets::UPDATE_MODELS_BTN,
    targets::ALERT,
    targets::STATUS_INDICATOR,
    targets::STATUS,
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let command = Commands::parse();

    let state = AppState::new()?;
    info!("Using backend at {}", state.settings.api.base_url);

    let page = Arc::new(ConsolePage::new(MemoryPage::with_elements(CONSOLE_TEMPLATE)));
    let dashboard = state.dashboard(page);

    match command {
        Commands::Health => {
            if !dashboard.load().await {
                bail!("Backend is not healthy");
            }
            println!("Backend is healthy");
        }

        Commands::Status => match dashboard.app_status().await {
            Some(status) => println!("{}", serde_json::to_string_pretty(&status)?),
            None => bail!("Could not fetch app status"),
        },

        Commands::Backtest {
            ticker,
            start_date,
            end_date,
            option_type,
            deviation,
            stop_loss,
        } => {
            let form = BacktestForm {
                ticker,
                start_date,
                end_date,
                option_type,
                deviation,
                stop_loss,
            };

            match dashboard.submit_backtest(form).await? {
                SubmitOutcome::Rendered(result) => {
                    match result.total_trades {
                        Some(trades) => info!("Backtest rendered with {} trades", trades),
                        None => info!("Backtest rendered without statistics"),
                    }
                }
                SubmitOutcome::Rejected(e) => bail!("{}", e),
            }
        }

        Commands::UpdateModels => match dashboard.update_models().await {
            Ok(report) => {
                println!("\nModel status: {}", report.status.label());
            }
            Err(e) => {
                error!("Model update did not complete: {}", e);
                return Err(e.into());
            }
        },
    }

    dashboard.teardown();
    Ok(())
}
