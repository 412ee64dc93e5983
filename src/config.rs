use std::time::Duration;

pub const API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Listing endpoint, relative to the API base.
pub const MARKETS_PATH: &str = "/coins/markets";

/// Largest page the listing endpoint serves.
pub const MAX_PER_PAGE: u32 = 250;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// Driver constants
pub const TOP_N: u32 = 10;
pub const QUOTE_CURRENCY: &str = "usd";
pub const OUTPUT_FILE: &str = "top10-crypto-daily-prices.csv";

/// Per-coin chart endpoint, relative to the API base.
pub fn market_chart_path(coin_id: &str) -> String {
    format!("/coins/{}/market_chart", coin_id)
}
