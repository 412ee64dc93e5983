//! Shared test fixtures for the integration tests.
//!
//! Provides [`FakeTransport`], which serves canned JSON (or error statuses)
//! keyed by request path and records every request it receives, plus small
//! builders for CoinGecko-shaped payloads.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use crypto_daily_prices::{CoinGeckoClient, RemoteError, Result, Transport};
use serde_json::{json, Value};

pub const FAKE_BASE: &str = "fake://coingecko";

/// One request seen by a [`FakeTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Recorded {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

pub type RequestLog = Arc<Mutex<Vec<Recorded>>>;

enum Reply {
    Json(Value),
    Status(u16),
}

/// In-memory [`Transport`]. Unknown paths answer 404.
#[derive(Default)]
pub struct FakeTransport {
    replies: HashMap<String, Reply>,
    log: RequestLog,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_json(mut self, path: &str, body: Value) -> Self {
        self.replies.insert(path.to_string(), Reply::Json(body));
        self
    }

    pub fn with_status(mut self, path: &str, status: u16) -> Self {
        self.replies.insert(path.to_string(), Reply::Status(status));
        self
    }

    /// Handle on the request log; stays valid after the transport is moved
    /// into a client.
    pub fn log(&self) -> RequestLog {
        self.log.clone()
    }
}

impl Transport for FakeTransport {
    fn base_url(&self) -> &str {
        FAKE_BASE
    }

    fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        self.log.lock().unwrap().push(Recorded {
            path: path.to_string(),
            query: query
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        });

        match self.replies.get(path) {
            Some(Reply::Json(body)) => Ok(body.clone()),
            Some(Reply::Status(status)) => Err(RemoteError::Status {
                status: *status,
                url: format!("{}{}", FAKE_BASE, path),
            }
            .into()),
            None => Err(RemoteError::Status {
                status: 404,
                url: format!("{}{}", FAKE_BASE, path),
            }
            .into()),
        }
    }
}

/// Build a client that talks to `fake`.
pub fn client_with(fake: FakeTransport) -> CoinGeckoClient {
    CoinGeckoClient::builder().transport(fake).build().unwrap()
}

pub fn requests(log: &RequestLog) -> Vec<Recorded> {
    log.lock().unwrap().clone()
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

/// A `/coins/markets` entry carrying the fields the client reads plus a few
/// it ignores.
pub fn market_entry(id: &str, symbol: &str, name: &str, market_cap: f64, volume: f64) -> Value {
    json!({
        "id": id,
        "symbol": symbol,
        "name": name,
        "image": format!("https://assets.example/{}.png", id),
        "current_price": 1.0,
        "market_cap": market_cap,
        "market_cap_rank": 1,
        "total_volume": volume,
        "last_updated": "2024-01-03T00:00:00.000Z"
    })
}

/// `count` synthetic entries with strictly decreasing market cap.
pub fn market_listing(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                market_entry(
                    &format!("coin-{}", i),
                    &format!("c{}", i),
                    &format!("Coin {}", i),
                    1_000_000.0 - i as f64,
                    10.0 + i as f64,
                )
            })
            .collect(),
    )
}

/// Milliseconds of midnight UTC on the given day.
pub fn day_ms(y: i32, m: u32, d: u32) -> i64 {
    date(y, m, d)
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp_millis()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A `/market_chart` body whose `prices` hold the given samples.
pub fn chart(samples: &[(i64, f64)]) -> Value {
    let prices: Vec<Value> = samples.iter().map(|(ms, p)| json!([ms, p])).collect();
    json!({
        "prices": prices,
        "market_caps": [],
        "total_volumes": []
    })
}

/// A chart of `days` consecutive daily samples starting at 2024-01-01.
pub fn daily_chart(days: u32, base_price: f64) -> Value {
    let samples: Vec<(i64, f64)> = (0..days)
        .map(|i| (day_ms(2024, 1, 1 + i), base_price + i as f64))
        .collect();
    chart(&samples)
}

pub fn chart_path(id: &str) -> String {
    format!("/coins/{}/market_chart", id)
}
