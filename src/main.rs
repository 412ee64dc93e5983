use std::process::ExitCode;

use crypto_daily_prices::pipeline::{self, RunOptions, RunReport};
use crypto_daily_prices::{CoinGeckoClient, Result};
use log::{error, info};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match try_main() {
        Ok(report) => {
            info!(
                "Exported {} rows for {} coins to {}",
                report.rows_written,
                report.coins.len(),
                report.output_path.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<RunReport> {
    let client = CoinGeckoClient::builder().build()?;
    info!("Using {}", client);
    pipeline::run(&client, &RunOptions::default())
}
