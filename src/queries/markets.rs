//! Ranked listing of the top coins by market capitalization.

use log::debug;
use serde_json::Value;

use crate::config;
use crate::error::{CoinGeckoError, Result};
use crate::models::CoinSummary;
use crate::queries::fields::{require_f64, require_str, schema, type_name};
use crate::CoinGeckoClient;

// ---------------------------------------------------------------------------
// RankedCoinsQuery
// ---------------------------------------------------------------------------

/// Query interface for the `/coins/markets` listing.
pub struct RankedCoinsQuery<'a> {
    client: &'a CoinGeckoClient,
}

impl<'a> RankedCoinsQuery<'a> {
    /// Create a new `RankedCoinsQuery` bound to the given client.
    pub fn new(client: &'a CoinGeckoClient) -> Self {
        Self { client }
    }

    /// Fetch the top `count` coins by market cap, priced in `quote_currency`.
    ///
    /// Issues one request for a single page of `count` entries, ordered by
    /// descending market cap, with sparklines disabled. `count` must be in
    /// `1..=250`.
    ///
    /// # Errors
    ///
    /// * [`CoinGeckoError::InvalidArgument`] for a bad `count` or empty currency
    ///   (no request is made).
    /// * [`CoinGeckoError::Remote`] on transport failure or a non-2xx status.
    /// * [`CoinGeckoError::Schema`] if any entry lacks `id`, `symbol`, `name`,
    ///   `market_cap` or `total_volume`, or a numeric field cannot be coerced.
    pub fn top(&self, count: u32, quote_currency: &str) -> Result<Vec<CoinSummary>> {
        if count == 0 || count > config::MAX_PER_PAGE {
            return Err(CoinGeckoError::InvalidArgument(format!(
                "count must be between 1 and {}, got {}",
                config::MAX_PER_PAGE,
                count
            )));
        }
        if quote_currency.trim().is_empty() {
            return Err(CoinGeckoError::InvalidArgument(
                "quote currency must not be empty".into(),
            ));
        }

        let params = [
            ("vs_currency", quote_currency.to_string()),
            ("order", "market_cap_desc".to_string()),
            ("per_page", count.to_string()),
            ("page", "1".to_string()),
            ("sparkline", "false".to_string()),
        ];
        let body = self
            .client
            .transport()
            .get_json(config::MARKETS_PATH, &params)?;

        let entries = match body {
            Value::Array(arr) => arr,
            other => {
                return Err(schema(format!(
                    "markets response is not an array (got {})",
                    type_name(&other)
                )))
            }
        };

        let coins = entries
            .iter()
            .enumerate()
            .map(|(pos, entry)| decode_entry(pos, entry))
            .collect::<Result<Vec<_>>>()?;

        debug!("markets: {} coins in {}", coins.len(), quote_currency);
        Ok(coins)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn decode_entry(pos: usize, entry: &Value) -> Result<CoinSummary> {
    let obj = entry
        .as_object()
        .ok_or_else(|| schema(format!("markets entry {} is not an object", pos)))?;

    let id = require_str(obj, "id", &format!("markets entry {}", pos))?;
    let ctx = format!("markets entry {} ({})", pos, id);

    Ok(CoinSummary {
        symbol: require_str(obj, "symbol", &ctx)?,
        name: require_str(obj, "name", &ctx)?,
        market_cap: require_f64(obj, "market_cap", &ctx)?,
        volume: require_f64(obj, "total_volume", &ctx)?,
        id,
    })
}
