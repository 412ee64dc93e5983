//! End-to-end run: list the top coins, fetch each one's history in rank
//! order, stack the series and export them.
//!
//! Calls are strictly sequential. Any error aborts the run before export,
//! so a failed run never writes (or replaces) the output file.

use std::path::PathBuf;

use log::info;

use crate::config;
use crate::error::Result;
use crate::export;
use crate::models::{CoinSummary, DayRange, PriceTable};
use crate::CoinGeckoClient;

/// Parameters of one run. [`Default`] holds the fixed driver constants.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub top_n: u32,
    pub quote_currency: String,
    pub day_range: DayRange,
    pub output_path: PathBuf,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            top_n: config::TOP_N,
            quote_currency: config::QUOTE_CURRENCY.to_string(),
            day_range: DayRange::Max,
            output_path: PathBuf::from(config::OUTPUT_FILE),
        }
    }
}

/// Outcome of a successful [`run`].
#[derive(Debug, Clone)]
pub struct RunReport {
    pub coins: Vec<CoinSummary>,
    pub rows_written: usize,
    pub output_path: PathBuf,
}

/// Fetch the ranked listing and every listed coin's history, in memory.
pub fn collect(
    client: &CoinGeckoClient,
    opts: &RunOptions,
) -> Result<(Vec<CoinSummary>, PriceTable)> {
    let mut coins = client.markets().top(opts.top_n, &opts.quote_currency)?;
    coins.truncate(opts.top_n as usize);
    info!("Fetched {} ranked coins", coins.len());

    let mut table = PriceTable::new();
    for (rank, coin) in coins.iter().enumerate() {
        let series = client
            .history()
            .fetch(&coin.id, &opts.quote_currency, opts.day_range)?;
        info!(
            "[{}/{}] {}: {} daily prices",
            rank + 1,
            coins.len(),
            coin.id,
            series.len()
        );
        table.push_series(series);
    }

    Ok((coins, table))
}

/// Run [`collect`] then write the table to `opts.output_path`.
pub fn run(client: &CoinGeckoClient, opts: &RunOptions) -> Result<RunReport> {
    let (coins, table) = collect(client, opts)?;
    let rows_written = export::write_csv_file(&table, &opts.output_path)?;
    Ok(RunReport {
        coins,
        rows_written,
        output_path: opts.output_path.clone(),
    })
}
