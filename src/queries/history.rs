//! Daily price history for a single coin from `/coins/{id}/market_chart`.

use log::{debug, warn};
use serde_json::Value;

use crate::config;
use crate::error::{CoinGeckoError, Result};
use crate::models::{DateBasis, DayRange, PricePoint};
use crate::queries::fields::{coerce_f64, schema, type_name};
use crate::CoinGeckoClient;

// ---------------------------------------------------------------------------
// CoinHistoryQuery
// ---------------------------------------------------------------------------

/// Query interface for one coin's historical price series.
pub struct CoinHistoryQuery<'a> {
    client: &'a CoinGeckoClient,
}

impl<'a> CoinHistoryQuery<'a> {
    /// Create a new `CoinHistoryQuery` bound to the given client.
    pub fn new(client: &'a CoinGeckoClient) -> Self {
        Self { client }
    }

    /// Fetch the price series of `coin_id` in `quote_currency` over `day_range`.
    ///
    /// Each `[timestamp_ms, price]` sample becomes one [`PricePoint`] stamped
    /// with `coin_id`, its timestamp truncated to a date per the client's
    /// [`DateBasis`]. Rows keep the API's order.
    ///
    /// # Errors
    ///
    /// * [`CoinGeckoError::InvalidArgument`] for an empty or malformed `coin_id`
    ///   or an empty currency (no request is made).
    /// * [`CoinGeckoError::Remote`] on transport failure or a non-2xx status.
    /// * [`CoinGeckoError::Schema`] if `prices` is absent or any sample is malformed.
    pub fn fetch(
        &self,
        coin_id: &str,
        quote_currency: &str,
        day_range: DayRange,
    ) -> Result<Vec<PricePoint>> {
        validate_coin_id(coin_id)?;
        if quote_currency.trim().is_empty() {
            return Err(CoinGeckoError::InvalidArgument(
                "quote currency must not be empty".into(),
            ));
        }

        let params = [
            ("vs_currency", quote_currency.to_string()),
            ("days", day_range.to_string()),
        ];
        let body = self
            .client
            .transport()
            .get_json(&config::market_chart_path(coin_id), &params)?;

        let points = decode_prices(coin_id, &body, self.client.date_basis())?;
        debug!("history: {} rows for {} ({})", points.len(), coin_id, day_range);

        if let Some(w) = points.windows(2).find(|w| w[0].date >= w[1].date) {
            warn!(
                "{}: dates not strictly increasing ({} then {})",
                coin_id, w[0].date, w[1].date
            );
        }
        Ok(points)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_coin_id(coin_id: &str) -> Result<()> {
    if coin_id.is_empty() {
        return Err(CoinGeckoError::InvalidArgument(
            "coin id must not be empty".into(),
        ));
    }
    if coin_id.contains('/') || coin_id.chars().any(char::is_whitespace) {
        return Err(CoinGeckoError::InvalidArgument(format!(
            "coin id {:?} cannot be used in a request path",
            coin_id
        )));
    }
    Ok(())
}

fn decode_prices(coin_id: &str, body: &Value, basis: DateBasis) -> Result<Vec<PricePoint>> {
    let prices = match body.get("prices") {
        Some(Value::Array(arr)) => arr,
        Some(other) => {
            return Err(schema(format!(
                "{}: 'prices' is not an array (got {})",
                coin_id,
                type_name(other)
            )))
        }
        None => return Err(schema(format!("{}: response has no 'prices' field", coin_id))),
    };

    prices
        .iter()
        .enumerate()
        .map(|(pos, sample)| -> Result<PricePoint> {
            let ctx = format!("{} prices[{}]", coin_id, pos);
            let pair = sample
                .as_array()
                .filter(|a| a.len() >= 2)
                .ok_or_else(|| schema(format!("{}: expected [timestamp_ms, price]", ctx)))?;

            let millis = coerce_f64(pair.first(), "timestamp", &ctx)?;
            let price = coerce_f64(pair.get(1), "price", &ctx)?;
            let date = to_millis(millis)
                .and_then(|ms| basis.date_from_millis(ms))
                .ok_or_else(|| schema(format!("{}: timestamp {} out of range", ctx, millis)))?;

            Ok(PricePoint {
                id: coin_id.to_string(),
                date,
                price,
            })
        })
        .collect()
}

/// Whole milliseconds of a JSON timestamp; fractions are dropped.
fn to_millis(value: f64) -> Option<i64> {
    if !value.is_finite() || value.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(value.trunc() as i64)
}
